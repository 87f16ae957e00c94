//! Table body markup.

use crate::schema::Row;

/// Render rows as `<tr>` elements, one per line.
pub fn render_rows(rows: &[Row]) -> String {
    let mut html = String::new();
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str("<td>");
            escape_into(&mut html, cell);
            html.push_str("</td>");
        }
        html.push_str("</tr>\n");
    }
    html
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_cells_per_row() {
        let rows = vec![["a", "b", "c", "d"].map(String::from)];
        assert_eq!(
            render_rows(&rows),
            "<tr><td>a</td><td>b</td><td>c</td><td>d</td></tr>\n"
        );
    }

    #[test]
    fn cells_are_escaped() {
        let rows = vec![["Duderstadt & Hamilton", "<b>", "\"q\"", "it's"].map(String::from)];
        let html = render_rows(&rows);
        assert!(html.contains("Duderstadt &amp; Hamilton"));
        assert!(html.contains("&lt;b&gt;"));
        assert!(html.contains("&quot;q&quot;"));
        assert!(html.contains("it&#39;s"));
    }

    #[test]
    fn no_rows_no_markup() {
        assert_eq!(render_rows(&[]), "");
    }
}
