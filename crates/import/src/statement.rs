use chrono::NaiveDate;
use fastpay_core::Money;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

use crate::transaction::BankTransaction;
use crate::transaction_type::BankTransactionType;

/// Every statement row carries exactly this many quoted columns.
pub const COLUMN_COUNT: usize = 13;

const FIELD_DELIMITER: &str = "\",\"";

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%d-%m-%Y", "%Y/%m/%d", "%d/%m/%Y"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatementError {
    #[error("Row {row}: unknown transaction type '{label}'")]
    UnknownTransactionType { row: usize, label: String },
    #[error("Row {row}: invalid date '{value}'")]
    InvalidDate { row: usize, value: String },
    #[error("Row {row}: invalid amount '{value}'")]
    InvalidAmount { row: usize, value: String },
}

/// Lazily turns statement lines into [`BankTransaction`]s.
///
/// Rows with the wrong column count are logged and skipped. Any other problem
/// with a row is yielded as an `Err` for that row; iteration may continue
/// past it.
pub struct StatementParser<I> {
    lines: I,
    row: usize,
}

impl<I, S> Iterator for StatementParser<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Result<BankTransaction, StatementError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            let row = self.row;
            self.row += 1;

            let fields = split_row(line.as_ref());
            if fields.len() != COLUMN_COUNT {
                tracing::warn!(
                    row,
                    columns = fields.len(),
                    "Line on row {} should have {} columns but has {}",
                    row,
                    COLUMN_COUNT,
                    fields.len()
                );
                continue;
            }

            return Some(build_transaction(row, &fields));
        }
    }
}

/// Starts parsing `lines`. Row indices in diagnostics count from zero after the
/// header, if any, has been dropped.
pub fn parse<I, S>(lines: I, skip_header: bool) -> StatementParser<std::iter::Skip<I::IntoIter>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    StatementParser {
        lines: lines.into_iter().skip(usize::from(skip_header)),
        row: 0,
    }
}

/// Parses already-decoded statement text, stopping at the first bad record.
pub fn parse_statement(text: &str, has_header: bool) -> Result<Vec<BankTransaction>, StatementError> {
    parse(text.lines(), has_header).collect()
}

/// Splits on `","`, drops the outer quotes of the row and trims every field.
fn split_row(line: &str) -> Vec<&str> {
    let line = line.trim();
    let line = line.strip_prefix('"').unwrap_or(line);
    let line = line.strip_suffix('"').unwrap_or(line);
    line.split(FIELD_DELIMITER).map(str::trim).collect()
}

fn build_transaction(row: usize, fields: &[&str]) -> Result<BankTransaction, StatementError> {
    let label = fields[2];
    let transaction_type = BankTransactionType::from_label(label).ok_or_else(|| {
        tracing::error!(row, label, "Unmapped transaction type");
        StatementError::UnknownTransactionType {
            row,
            label: label.to_string(),
        }
    })?;

    Ok(BankTransaction {
        operation_date: parse_date(row, fields[0])?,
        currency_date: parse_date(row, fields[1])?,
        transaction_type,
        amount: parse_amount(row, fields[3])?,
        currency: fields[4].to_string(),
        balance_after_transaction: parse_amount(row, fields[5])?,
        description: fields[6].to_string(),
        field1: fields[7].to_string(),
        field2: fields[8].to_string(),
        field3: fields[9].to_string(),
    })
}

fn parse_date(row: usize, s: &str) -> Result<NaiveDate, StatementError> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .ok_or_else(|| StatementError::InvalidDate {
            row,
            value: s.to_string(),
        })
}

/// Accepts `+` prefixes, space or NBSP grouping and either decimal separator.
///
/// A lone `,` is the decimal comma. When both `,` and `.` appear, the one
/// further right is the decimal separator and the other is grouping
/// (`1.234,56` and `1,234.56` both read as 1234.56).
fn parse_amount(row: usize, s: &str) -> Result<Money, StatementError> {
    let invalid = || StatementError::InvalidAmount {
        row,
        value: s.to_string(),
    };

    let compact: String = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{a0}')
        .collect();
    let decimal_comma = match (compact.rfind(','), compact.rfind('.')) {
        (Some(comma), Some(dot)) => comma > dot,
        (Some(_), None) => true,
        _ => false,
    };
    let cleaned = if decimal_comma {
        compact.replace('.', "").replace(',', ".")
    } else {
        compact.replace(',', "")
    };
    let cleaned = cleaned.strip_prefix('+').unwrap_or(cleaned.as_str());

    if cleaned.is_empty() {
        return Err(invalid());
    }

    Decimal::from_str(cleaned)
        .map(Money::from_decimal)
        .map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = r#""Data operacji","Data waluty","Typ transakcji","Kwota","Waluta","Saldo po transakcji","Opis transakcji","","","","","","""#;

    fn row(label: &str, amount: &str) -> String {
        format!(
            r#""2025-01-08","2025-01-09","{label}","{amount}","PLN","+1523.17","Tytuł:  000498849 74230785008012345678","Lokalizacja: Adres: SKLEP ABC Miasto: Krakow Kraj: POLSKA","Data wykonania operacji: 2025-01-07 18:22:41","","","","""#
        )
    }

    fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    // ── split_row ─────────────────────────────────────────────────────────────

    #[test]
    fn split_row_strips_quotes_and_trims() {
        let fields = split_row(r#""a"," b ","","d""#);
        assert_eq!(fields, vec!["a", "b", "", "d"]);
    }

    #[test]
    fn split_row_keeps_plain_commas_inside_fields() {
        let fields = split_row(r#""Tytuł: zakupy, dom","x""#);
        assert_eq!(fields, vec!["Tytuł: zakupy, dom", "x"]);
    }

    #[test]
    fn split_row_of_fixture_has_thirteen_columns() {
        assert_eq!(split_row(&row("Płatność kartą", "-12.50")).len(), COLUMN_COUNT);
        assert_eq!(split_row(HEADER).len(), COLUMN_COUNT);
    }

    // ── parse_amount / parse_date ─────────────────────────────────────────────

    #[test]
    fn parse_amount_variants() {
        assert_eq!(parse_amount(0, "-12.50").unwrap(), money("-12.5"));
        assert_eq!(parse_amount(0, "+1523.17").unwrap(), money("1523.17"));
        assert_eq!(parse_amount(0, "-1 234,56").unwrap(), money("-1234.56"));
        assert_eq!(parse_amount(0, "0.001").unwrap(), money("0.001"));
    }

    #[test]
    fn parse_amount_with_grouping_and_decimal_separator() {
        assert_eq!(parse_amount(0, "1.234,56").unwrap(), money("1234.56"));
        assert_eq!(parse_amount(0, "1,234.56").unwrap(), money("1234.56"));
        assert_eq!(parse_amount(0, "-1.234.567,89").unwrap(), money("-1234567.89"));
        assert_eq!(parse_amount(0, "+12,345,678.9").unwrap(), money("12345678.9"));
        assert_eq!(parse_amount(0, "12,5").unwrap(), money("12.5"));
    }

    #[test]
    fn parse_amount_invalid() {
        assert!(matches!(
            parse_amount(4, "abc"),
            Err(StatementError::InvalidAmount { row: 4, .. })
        ));
        assert!(parse_amount(0, "").is_err());
        assert!(parse_amount(0, "+").is_err());
    }

    #[test]
    fn parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 8).unwrap();
        assert_eq!(parse_date(0, "2025-01-08").unwrap(), expected);
        assert_eq!(parse_date(0, "08.01.2025").unwrap(), expected);
        assert!(matches!(
            parse_date(2, "yesterday"),
            Err(StatementError::InvalidDate { row: 2, .. })
        ));
    }

    // ── parse ─────────────────────────────────────────────────────────────────

    #[test]
    fn parse_reads_all_columns() {
        let lines = vec![HEADER.to_string(), row("Płatność kartą", "-12.50")];
        let txs: Vec<_> = parse(&lines, true).collect::<Result<_, _>>().unwrap();

        assert_eq!(txs.len(), 1);
        let tx = &txs[0];
        assert_eq!(tx.operation_date, NaiveDate::from_ymd_opt(2025, 1, 8).unwrap());
        assert_eq!(tx.currency_date, NaiveDate::from_ymd_opt(2025, 1, 9).unwrap());
        assert_eq!(tx.transaction_type, BankTransactionType::CardPayment);
        assert_eq!(tx.amount, money("-12.50"));
        assert_eq!(tx.currency, "PLN");
        assert_eq!(tx.balance_after_transaction, money("1523.17"));
        assert_eq!(tx.description, "Tytuł:  000498849 74230785008012345678");
        assert_eq!(
            tx.field1,
            "Lokalizacja: Adres: SKLEP ABC Miasto: Krakow Kraj: POLSKA"
        );
        assert_eq!(tx.field2, "Data wykonania operacji: 2025-01-07 18:22:41");
        assert_eq!(tx.field3, "");
    }

    #[test]
    fn parse_skips_rows_with_wrong_column_count() {
        let good = row("Prowizja", "-5.00");
        let twelve = good.replacen(r#","""#, "", 1);
        let fourteen = format!(r#"{good},"extra""#);
        assert_eq!(split_row(&twelve).len(), 12);
        assert_eq!(split_row(&fourteen).len(), 14);

        let lines = [good.as_str(), twelve.as_str(), fourteen.as_str(), "", good.as_str()];
        let txs: Vec<_> = parse(lines, false).collect::<Result<_, _>>().unwrap();
        assert_eq!(txs.len(), 2);
    }

    #[test]
    fn parse_without_header_keeps_first_line() {
        let lines = [row("Prowizja", "-5.00")];
        assert_eq!(parse(lines.iter(), false).count(), 1);
        assert_eq!(parse(lines.iter(), true).count(), 0);
    }

    #[test]
    fn unknown_label_fails_that_record() {
        let lines = [
            row("Prowizja", "-5.00"),
            row("Przelew BLIK", "-20.00"),
            row("Zlecenie stałe", "-300.00"),
        ];
        let results: Vec<_> = parse(&lines, false).collect();

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert_eq!(
            results[1],
            Err(StatementError::UnknownTransactionType {
                row: 1,
                label: "Przelew BLIK".to_string()
            })
        );
        assert!(results[2].is_ok());
    }

    #[test]
    fn row_index_counts_skipped_rows() {
        let lines = ["broken".to_string(), row("Nieznany", "1.00")];
        let err = parse(&lines, false).next().unwrap().unwrap_err();
        assert!(matches!(err, StatementError::UnknownTransactionType { row: 1, .. }));
    }

    #[test]
    fn parse_is_lazy() {
        let mut pulled = 0;
        let lines = (0..1000).map(|_| {
            pulled += 1;
            row("Prowizja", "-1.00")
        });
        let first_two: Vec<_> = parse(lines, false).take(2).collect();
        assert_eq!(first_two.len(), 2);
        assert_eq!(pulled, 2);
    }

    #[test]
    fn parse_statement_collects_or_fails() {
        let text = format!(
            "{}\n{}\n{}\n",
            HEADER,
            row("Prowizja", "-5.00"),
            row("Zlecenie zmienne", "-99.99")
        );
        let txs = parse_statement(&text, true).unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[1].transaction_type, BankTransactionType::VariableOrder);

        let bad = format!("{}\n{}\n", row("Prowizja", "-5.00"), row("???", "1"));
        assert!(matches!(
            parse_statement(&bad, false),
            Err(StatementError::UnknownTransactionType { .. })
        ));
    }
}
