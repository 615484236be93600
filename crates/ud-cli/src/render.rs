//! Plain-text rendering of the presentation models.

use ud_models::User;
use ud_services::presentation::list_view::EMPTY_MESSAGE;
use ud_services::presentation::{FieldView, ListView};

const GAP: &str = "  ";

/// The user table, or whichever placeholder the view calls for
pub fn list(view: &ListView) -> String {
    match view {
        ListView::Loading => "Loading users...".to_string(),
        ListView::Error(message) => format!("Error: {message}"),
        ListView::Empty => EMPTY_MESSAGE.to_string(),
        ListView::Rows(rows) => {
            let header: Vec<&str> = std::iter::once("ID")
                .chain(ListView::COLUMNS.iter().copied())
                .collect();
            let cells: Vec<[&str; 4]> = rows
                .iter()
                .map(|r| [r.id.as_str(), r.name.as_str(), r.email.as_str(), r.phone.as_str()])
                .collect();

            let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
            for row in &cells {
                for (width, cell) in widths.iter_mut().zip(row) {
                    *width = (*width).max(cell.chars().count());
                }
            }

            let mut lines = vec![table_line(&header, &widths)];
            lines.extend(cells.iter().map(|row| table_line(row, &widths)));
            lines.join("\n")
        }
    }
}

fn table_line(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(GAP)
        .trim_end()
        .to_string()
}

pub fn user(user: &User) -> String {
    format!(
        "ID:    {}\nName:  {}\nEmail: {}\nPhone: {}",
        user.id,
        user.full_name(),
        user.email,
        user.phone
    )
}

/// `Label*: `, with the current value in brackets when there is one
pub fn field_prompt(field: &FieldView) -> String {
    let mut prompt = field.label.to_string();
    if field.required {
        prompt.push('*');
    }
    if !field.value.is_empty() {
        prompt.push_str(&format!(" [{}]", field.value));
    }
    prompt.push_str(": ");
    prompt
}

/// Inline error next to the field label
pub fn field_error(field: &FieldView) -> Option<String> {
    field
        .error
        .as_ref()
        .map(|error| format!("{}: {}", field.label, error))
}
