use comfy_table::Table;

use crate::{
    bills::{BillsView, ReceiptModal},
    new_bill::NewBill,
};

/// Рисует страницу со списком расходов.
pub fn render_bills(view: &BillsView) -> String {
    match view {
        BillsView::Table { rows } => {
            let mut table = Table::new();
            table.set_header(vec!["Id", "Type", "Nom", "Date", "Montant", "Statut"]);

            for row in rows {
                table.add_row(vec![
                    row.id.clone(),
                    row.bill_type.to_string(),
                    row.name.clone(),
                    row.date.clone(),
                    format!("{} €", row.amount),
                    row.status.to_owned(),
                ]);
            }

            format!(
                "Mes notes de frais\n{}\n{} note(s) de frais",
                table,
                view.row_count()
            )
        }
        BillsView::Error(message) => format!("Erreur\n{}", message),
    }
}

/// Рисует сообщения об ошибках формы создания расхода.
pub fn render_form_errors(form: &NewBill) -> String {
    [form.file_error(), form.submit_error()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join("\n")
}

/// Показывает чек в терминале.
pub struct TerminalModal;

impl ReceiptModal for TerminalModal {
    fn show(&self, receipt_url: &str) {
        println!("Justificatif\n{}", receipt_url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bills::BillRow,
        model::{Amount, BillType},
    };

    #[test]
    fn renders_rows_and_count() {
        let view = BillsView::Table {
            rows: vec![BillRow {
                id: "47qAXb6fIm2zOKkLzMro".into(),
                bill_type: BillType::Hotel,
                name: "encore".into(),
                date: "4 Avr. 04".into(),
                raw_date: "2004-04-04".into(),
                amount: Amount::new(400.0).unwrap(),
                status: "En attente",
                file_url: None,
            }],
        };

        let out = render_bills(&view);

        assert!(out.contains("Hôtel et logement"));
        assert!(out.contains("4 Avr. 04"));
        assert!(out.contains("400 €"));
        assert!(out.contains("1 note(s) de frais"));
    }

    #[test]
    fn renders_error_message_verbatim() {
        let out = render_bills(&BillsView::Error("Erreur 404".into()));

        assert!(out.contains("Erreur 404"));
    }
}
