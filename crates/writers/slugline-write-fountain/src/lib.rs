//! Fountain screenplay writer for slugline.
//!
//! Turns an element stream back into Fountain text. Elements carry their raw
//! line text, so emitting a parsed document reproduces it line for line and
//! re-parsing the output yields the same element types.

use slugline_core::{EmitOptions, FountainElement, TitlePageField};

/// Emit elements as Fountain text.
pub fn emit(elements: &[FountainElement]) -> String {
    emit_with_options(elements, &EmitOptions::default())
}

/// Emit elements as Fountain text with options.
pub fn emit_with_options(elements: &[FountainElement], options: &EmitOptions) -> String {
    let mut ctx = EmitContext::new(options);

    for (index, element) in elements.iter().enumerate() {
        if index > 0 {
            ctx.newline();
        }
        ctx.write_element(element);
    }

    if options.trailing_newline && !ctx.output.ends_with('\n') {
        ctx.newline();
    }

    ctx.output
}

/// Emit a title page block, ending with the blank line that separates it from
/// the body. Multi-line values are written as indented continuation lines.
pub fn emit_title_page(fields: &[TitlePageField]) -> String {
    let options = EmitOptions::default();
    let mut ctx = EmitContext::new(&options);

    for field in fields {
        let mut lines = field.value.split('\n');
        let first = lines.next().unwrap_or_default();
        let rest: Vec<&str> = lines.collect();

        if rest.is_empty() {
            ctx.writeln(&format!("{}: {}", field.key, first));
        } else {
            // A value that spans lines starts on the line after its key.
            ctx.writeln(&format!("{}:", field.key));
            for line in std::iter::once(first).chain(rest) {
                ctx.writeln(&format!("   {line}"));
            }
        }
    }

    ctx.ensure_blank_line();
    ctx.output
}

struct EmitContext<'a> {
    output: String,
    options: &'a EmitOptions,
}

impl<'a> EmitContext<'a> {
    fn new(options: &'a EmitOptions) -> Self {
        Self {
            output: String::new(),
            options,
        }
    }

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn newline(&mut self) {
        self.output.push('\n');
    }

    fn writeln(&mut self, s: &str) {
        self.write(s);
        self.newline();
    }

    fn ensure_blank_line(&mut self) {
        if !self.output.is_empty() && !self.output.ends_with("\n\n") {
            if self.output.ends_with('\n') {
                self.output.push('\n');
            } else {
                self.output.push_str("\n\n");
            }
        }
    }

    fn write_element(&mut self, element: &FountainElement) {
        let text = if self.options.strip_trailing_whitespace {
            element.text.trim_end()
        } else {
            element.text.as_str()
        };
        self.write(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slugline_core::ElementType;
    use slugline_read_fountain::parse;

    fn types(document: &str) -> Vec<ElementType> {
        parse(document).into_iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_emit_reproduces_document() {
        let doc = "INT. KITCHEN - DAY\n\nJOHN\n(beat)\nHello.\n\nCUT TO:\n";
        assert_eq!(emit(&parse(doc)), doc);
    }

    #[test]
    fn test_emit_round_trip_types() {
        let doc = "Title: Test\n\n# Act One\n= Setup.\n\nEXT. PARK - DAY\n\n> THE END <\n===\n[[note]]\n~la la~";
        let emitted = emit(&parse(doc));
        assert_eq!(types(&emitted), types(doc));
    }

    #[test]
    fn test_emit_strips_trailing_whitespace() {
        let options = EmitOptions {
            strip_trailing_whitespace: true,
            trailing_newline: true,
        };
        let doc = "INT. KITCHEN - DAY\r\n  \r\nJOHN  \r\nHi.";
        let emitted = emit_with_options(&parse(doc), &options);
        assert_eq!(emitted, "INT. KITCHEN - DAY\n\nJOHN\nHi.\n");
        assert_eq!(types(emitted.trim_end_matches('\n')), types(doc));
    }

    #[test]
    fn test_emit_empty() {
        assert_eq!(emit(&[]), "");
        assert_eq!(emit(&parse("")), "");
    }

    #[test]
    fn test_emit_title_page_single_field() {
        let fields = vec![TitlePageField {
            key: "Author".to_string(),
            value: "Jane Doe".to_string(),
        }];
        assert_eq!(emit_title_page(&fields), "Author: Jane Doe\n\n");
        assert_eq!(emit_title_page(&[]), "");
    }

    #[test]
    fn test_emit_title_page() {
        let fields = vec![
            TitlePageField {
                key: "Title".to_string(),
                value: "Big Fish".to_string(),
            },
            TitlePageField {
                key: "Contact".to_string(),
                value: "Some Agency\n555-0100".to_string(),
            },
        ];
        let page = emit_title_page(&fields);
        assert_eq!(
            page,
            "Title: Big Fish\nContact:\n   Some Agency\n   555-0100\n\n"
        );
        assert_eq!(slugline_read_fountain::title_page(&page), fields);
    }
}
