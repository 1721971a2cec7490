use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::Record;

const ROW_HEIGHT: f32 = 18.0;
const HEADERS: [&str; 5] = ["Name", "Class", "Mass (g)", "Year", "Fall"];

/// Scrollable table of the active records.
pub fn records_table(ui: &mut Ui, records: &[&Record]) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::initial(180.0).at_least(80.0))
        .column(Column::initial(100.0))
        .column(Column::initial(90.0))
        .column(Column::initial(60.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, records.len(), |mut row| {
                let r = records[row.index()];
                for cell in row_cells(r) {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}

/// Cell text for one record, in `HEADERS` order. Missing values are blank.
fn row_cells(r: &Record) -> [String; 5] {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();
    [
        text(&r.name),
        text(&r.recclass),
        text(&r.mass),
        r.parsed_year().map(|y| y.to_string()).unwrap_or_default(),
        text(&r.fall),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_cells() {
        let r = Record {
            name: Some("Aachen".into()),
            recclass: Some("L5".into()),
            year: Some("1880-01-01T00:00:00.000".into()),
            ..Default::default()
        };
        assert_eq!(row_cells(&r), ["Aachen", "L5", "", "1880", ""].map(String::from));
    }
}
