use crate::core::parser::is_blank_line;
use crate::domain::model::ValidationVerdict;
use csv::{ErrorKind, ReaderBuilder, Trim};

pub const DEFAULT_REQUIRED_HEADERS: [&str; 3] = ["date", "metric", "value"];

/// Structural check the local bridge answers `validate_csv` with.
///
/// Accepts only files the local row splitter can handle: a header carrying
/// the required columns, the same number of fields on every line, and no
/// quoted fields. Lines the splitter drops are ignored here too, so the row
/// count matches the number of entries an import produces.
#[derive(Debug, Clone)]
pub struct StructureValidator {
    required_headers: Vec<String>,
}

impl Default for StructureValidator {
    fn default() -> Self {
        Self::new(DEFAULT_REQUIRED_HEADERS.iter().map(|h| h.to_string()).collect())
    }
}

impl StructureValidator {
    pub fn new(required_headers: Vec<String>) -> Self {
        Self { required_headers }
    }

    pub fn check(&self, content: &str) -> ValidationVerdict {
        // 與 parse_rows 相同的規則：全空白的行不算資料列
        let kept: Vec<(usize, &str)> = content
            .split('\n')
            .enumerate()
            .filter(|(_, line)| !is_blank_line(line))
            .map(|(index, line)| (index + 1, line))
            .collect();

        if kept.is_empty() {
            return ValidationVerdict::invalid("File is empty");
        }

        if let Some((line_no, _)) = kept.iter().find(|(_, line)| line.contains('"')) {
            return ValidationVerdict::invalid(format!(
                "Quoted fields are not supported (line {})",
                line_no
            ));
        }

        let filtered = kept
            .iter()
            .map(|(_, line)| *line)
            .collect::<Vec<_>>()
            .join("\n");
        let source_line = |filtered_line: u64| {
            usize::try_from(filtered_line)
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| kept.get(i))
                .map(|(line_no, _)| *line_no)
                .unwrap_or_default()
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .trim(Trim::All)
            .from_reader(filtered.as_bytes());

        let headers: Vec<String> = match reader.headers() {
            Ok(headers) => headers.iter().map(|h| h.to_ascii_lowercase()).collect(),
            Err(e) => return ValidationVerdict::invalid(format!("Unreadable header: {}", e)),
        };

        let missing: Vec<&str> = self
            .required_headers
            .iter()
            .filter(|required| !headers.contains(&required.to_ascii_lowercase()))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            return ValidationVerdict::invalid(format!(
                "Missing required header(s): {}",
                missing.join(", ")
            ));
        }

        let mut data_rows = 0usize;
        for record in reader.records() {
            match record {
                Ok(_) => data_rows += 1,
                Err(e) => {
                    let message = match e.kind() {
                        ErrorKind::UnequalLengths {
                            pos,
                            expected_len,
                            len,
                        } => format!(
                            "Line {} has {} fields, expected {}",
                            pos.as_ref().map(|p| source_line(p.line())).unwrap_or_default(),
                            len,
                            expected_len
                        ),
                        _ => format!("Malformed CSV: {}", e),
                    };
                    return ValidationVerdict::invalid(message);
                }
            }
        }

        if data_rows == 0 {
            return ValidationVerdict::invalid("No data rows found");
        }

        ValidationVerdict::valid(format!(
            "{} data rows, {} columns",
            data_rows,
            headers.len()
        ))
    }
}
