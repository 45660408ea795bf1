//! Numbered menu loop over arbitrary read/write streams.
//!
//! The menu only collects raw fields into a payload string; every validation
//! rule lives with the worker, so a bad answer here still comes back as a
//! tidy "invalid request" message instead of a prompt-side rejection.

use std::io::{self, BufRead, Write};

use nu_ansi_term::{Color, Style};

use crate::coordinator::Coordinator;
use crate::request::OpKind;

/// Run the menu until the user exits or input runs out.
pub fn run_menu<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    coordinator: &Coordinator,
) -> io::Result<()> {
    writeln!(output, "{}", Style::new().bold().paint("till"))?;

    loop {
        print_menu(output)?;
        let choice = match read_line(input, output, "> ")? {
            Some(line) => line,
            None => break,
        };

        let dispatched = match choice.trim() {
            "0" => break,
            "1" => coordinator.dispatch(OpKind::ListProducts, None),
            "2" => {
                let payload = match prompt_fields(
                    input,
                    output,
                    &["type (P/D): ", "name: ", "price: ", "shipping (P only): "],
                )? {
                    Some(fields) => fields.join("|"),
                    None => break,
                };
                coordinator.dispatch(OpKind::AddProduct, Some(&payload))
            }
            "3" => coordinator.dispatch(OpKind::ListUsers, None),
            "4" => {
                let payload = match prompt_fields(input, output, &["name: ", "balance: "])? {
                    Some(fields) => fields.join("|"),
                    None => break,
                };
                coordinator.dispatch(OpKind::RegisterUser, Some(&payload))
            }
            "5" => {
                let payload =
                    match prompt_fields(input, output, &["user id: ", "product id: "])? {
                        Some(fields) => fields.join("|"),
                        None => break,
                    };
                coordinator.dispatch(OpKind::Purchase, Some(&payload))
            }
            "6" => {
                let payload = match prompt_fields(input, output, &["user id: "])? {
                    Some(fields) => fields.join("|"),
                    None => break,
                };
                coordinator.dispatch(OpKind::UpgradeVip, Some(&payload))
            }
            "" => continue,
            other => {
                writeln!(output, "{}", Color::Red.paint(format!("unknown choice: {}", other)))?;
                continue;
            }
        };

        match dispatched {
            Ok(message) if !message.is_empty() => writeln!(output, "{}", message)?,
            Ok(_) => {}
            Err(err) => writeln!(
                output,
                "{}",
                Color::Red.paint(format!("operation failed: {}", err))
            )?,
        }
    }

    writeln!(output, "bye")?;
    Ok(())
}

fn print_menu<W: Write>(output: &mut W) -> io::Result<()> {
    writeln!(output)?;
    writeln!(output, "1) list products")?;
    writeln!(output, "2) add product")?;
    writeln!(output, "3) list users")?;
    writeln!(output, "4) register user")?;
    writeln!(output, "5) purchase")?;
    writeln!(output, "6) upgrade to VIP")?;
    writeln!(output, "0) exit")?;
    Ok(())
}

/// One prompted line; `None` means the input stream ended.
fn read_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(output, "{}", prompt)?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

fn prompt_fields<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompts: &[&str],
) -> io::Result<Option<Vec<String>>> {
    let mut fields = Vec::with_capacity(prompts.len());
    for prompt in prompts {
        match read_line(input, output, prompt)? {
            Some(field) => fields.push(field),
            None => return Ok(None),
        }
    }
    Ok(Some(fields))
}
