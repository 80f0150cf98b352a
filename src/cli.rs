use std::path::PathBuf;

use billed::{
    model::{BillType, ReceiptFile},
    new_bill::FormValues,
};
use chrono::NaiveDate;
use enum_iterator::all;
use inquire::{validator::Validation, Confirm, DateSelect, Select, Text};

/// Запрашивает путь до файла с чеком и читает его.
pub fn ask_receipt() -> anyhow::Result<Vec<ReceiptFile>> {
    let path = text("Justificatif (jpg, jpeg, png)", None, true)?;

    let file = ReceiptFile::read(&PathBuf::from(path))?;

    Ok(vec![file])
}

/// Запрашивает значения всех полей формы.
/// Если форма уже заполнялась, старые значения подставляются по умолчанию.
pub fn ask_values(previous: Option<&FormValues>) -> anyhow::Result<FormValues> {
    let prev = previous.cloned().unwrap_or_default();

    let types: Vec<BillType> = all::<BillType>().collect();
    let start = types
        .iter()
        .position(|t| t.to_string() == prev.expense_type)
        .unwrap_or_default();
    let expense_type = Select::new("Type de dépense", types)
        .with_starting_cursor(start)
        .prompt()?;

    let name = text("Nom de la dépense", Some(prev.name.as_str()), false)?;

    let mut date_prompt = DateSelect::new("Date");
    if let Ok(d) = NaiveDate::parse_from_str(&prev.date, "%Y-%m-%d") {
        date_prompt = date_prompt.with_default(d);
    }
    let date = date_prompt.prompt()?;

    let amount = text("Montant TTC", Some(prev.amount.as_str()), true)?;
    let vat = text("TVA", Some(prev.vat.as_str()), false)?;
    let pct_default = if prev.pct.is_empty() { "20" } else { prev.pct.as_str() };
    let pct = text("TVA, %", Some(pct_default), false)?;
    let commentary = text("Commentaire", Some(prev.commentary.as_str()), false)?;

    Ok(FormValues {
        expense_type: expense_type.to_string(),
        name,
        date: date.format("%Y-%m-%d").to_string(),
        amount,
        vat,
        pct,
        commentary,
    })
}

/// Спрашивает, повторить ли неудавшееся действие.
pub fn confirm_retry() -> anyhow::Result<bool> {
    let answer = Confirm::new("Réessayer ?").with_default(true).prompt()?;

    Ok(answer)
}

fn text(title: &str, default: Option<&str>, required: bool) -> anyhow::Result<String> {
    let mut prompt = Text::new(title);

    if let Some(d) = default.filter(|d| !d.is_empty()) {
        prompt = prompt.with_default(d);
    }

    if required {
        prompt = prompt.with_validator(|s: &str| {
            if s.trim().is_empty() {
                return Ok(Validation::Invalid("required".into()));
            };
            Ok(Validation::Valid)
        });
    }

    let val = prompt.prompt()?;

    Ok(val.trim().to_owned())
}
