use std::collections::HashMap;

/// A CSV export split into its header line and data lines.
///
/// Line endings are normalized to `\n` up front; the data lines are only
/// tokenized when [`CsvDocument::rows`] is iterated, and iterating again
/// starts over from the first data line.
#[derive(Debug, Clone)]
pub struct CsvDocument {
    headers: Vec<String>,
    body: String,
}

impl CsvDocument {
    pub fn parse(text: &str) -> Self {
        let normalized = text.trim().replace("\r\n", "\n").replace('\r', "\n");

        // A header without any data line is treated like an empty file
        let Some((header_line, body)) = normalized.split_once('\n') else {
            return Self {
                headers: Vec::new(),
                body: String::new(),
            };
        };

        let headers = split_line(header_line)
            .iter()
            .map(|h| clean_value(h).to_string())
            .collect();

        Self {
            headers,
            body: body.to_string(),
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> Rows<'_> {
        Rows {
            headers: &self.headers,
            lines: if self.headers.is_empty() {
                None
            } else {
                Some(self.body.split('\n'))
            },
        }
    }
}

/// Iterator over the data rows of a [`CsvDocument`].
///
/// Blank lines and lines with fewer fields than there are headers are
/// skipped; fields past the last header are ignored.
pub struct Rows<'a> {
    headers: &'a [String],
    lines: Option<std::str::Split<'a, char>>,
}

impl Iterator for Rows<'_> {
    type Item = CsvRow;

    fn next(&mut self) -> Option<Self::Item> {
        let lines = self.lines.as_mut()?;
        for line in lines.by_ref() {
            if line.trim().is_empty() {
                continue;
            }

            let fields = split_line(line);
            if fields.len() < self.headers.len() {
                continue;
            }

            let values = self
                .headers
                .iter()
                .zip(fields.iter())
                .map(|(header, field)| (header.clone(), clean_value(field).to_string()))
                .collect();

            return Some(CsvRow { values });
        }
        None
    }
}

/// One data row keyed by header name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvRow {
    values: HashMap<String, String>,
}

impl CsvRow {
    /// Value under `header`, or `None` when the column is missing or empty
    pub fn get(&self, header: &str) -> Option<&str> {
        self.values
            .get(header)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// First non-empty value among `headers`, in order
    pub fn first_of(&self, headers: &[&str]) -> Option<&str> {
        headers.iter().find_map(|h| self.get(h))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.values.len()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CsvRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Split one line on commas that are not inside double quotes.
///
/// Quotes delimit fields and are dropped; `""` inside a quoted field is a
/// literal quote.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}

/// Trim a raw field and drop one stray leading and trailing quote
fn clean_value(raw: &str) -> &str {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    trimmed.strip_suffix('"').unwrap_or(trimmed)
}
