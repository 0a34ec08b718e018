use anyhow::Result;
use chrono::NaiveDateTime;
use dompet_core::format_currency;
use std::io::{BufRead, Write};

use crate::config::Config;
use crate::ledger::Ledger;
use crate::messages::{handle_message, render};

const GREETING: &str = "Halo! Kirim transaksi seperti \"Beli makan 25000\". \
/saldo untuk cek saldo, /keluar untuk selesai.";

/// Line-based chat session.
///
/// Every line is one inbound message; `clock` is asked for the reference
/// time once per message. Returns the session ledger.
pub fn run_chat<R, W, C>(input: R, mut out: W, cfg: &Config, mut clock: C) -> Result<Ledger>
where
    R: BufRead,
    W: Write,
    C: FnMut() -> Result<NaiveDateTime>,
{
    let mut ledger = Ledger::new();
    writeln!(out, "{GREETING}")?;

    for line in input.lines() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        match text.to_lowercase().as_str() {
            "/keluar" | "/exit" | "/quit" => break,
            "/saldo" | "/balance" => {
                writeln!(
                    out,
                    "💼 Saldo sesi ini: {} ({} transaksi)",
                    format_currency(ledger.balance(), &cfg.locale.currency_symbol),
                    ledger.len()
                )?;
                continue;
            }
            _ => {}
        }

        let reply = handle_message(text, cfg, clock()?);
        if let Some(record) = reply.record() {
            ledger.push(record);
        }
        writeln!(out, "{}\n", render(&reply, cfg))?;
    }

    writeln!(out, "Sampai jumpa! 👋")?;
    Ok(ledger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Cursor;

    fn clock() -> Result<NaiveDateTime> {
        Ok(NaiveDate::from_ymd_opt(2025, 8, 22)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap())
    }

    #[test]
    fn test_session_keeps_balance() {
        let input = Cursor::new("Gaji bulan ini 5 juta\n\nBeli makan 25000\nhalo\n/saldo\n");
        let mut out = Vec::new();
        let ledger = run_chat(input, &mut out, &Config::default(), clock).unwrap();

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.balance(), 4_975_000.0);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("tidak mengerti"));
        assert!(text.contains("Saldo sesi ini: Rp "));
        assert!(text.contains("(2 transaksi)"));
        assert!(text.ends_with("Sampai jumpa! 👋\n"));
    }

    #[test]
    fn test_exit_command_stops_reading() {
        let input = Cursor::new("/keluar\nBeli makan 25000\n");
        let mut out = Vec::new();
        let ledger = run_chat(input, &mut out, &Config::default(), clock).unwrap();
        assert!(ledger.is_empty());
    }
}
