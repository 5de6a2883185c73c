//! Markdown snippets inserted by the toolbar
//!
//! Each toolbar button wraps the selected text (or a placeholder when nothing
//! is selected) in markdown syntax. The control replaces the selection with
//! the snippet text and, when nothing was selected, selects the placeholder so
//! the user can type over it.

/// A toolbar insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertKind {
    /// `**text**`
    Bold,
    /// `*text*`
    Italic,
    /// `# text`
    Heading,
    /// `> text`
    Reference,
    /// `[text](http://)`
    Link,
    /// `![](http://)`
    Image,
    /// `- text`
    UnorderedList,
    /// `1. text`
    OrderedList,
    /// Fenced code block with a `language` tag to overtype
    Code,
    /// Caller-supplied text, inserted verbatim
    Custom(String),
}

/// Text to insert for one toolbar action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// Replacement for the selection
    pub text: String,
    /// Placeholder used when nothing was selected
    pub placeholder: &'static str,
    /// Characters between the insertion start and the placeholder.
    /// `None` leaves the caret where the insertion ended.
    pub caret_offset: Option<usize>,
}

impl Snippet {
    fn new(text: String, placeholder: &'static str, caret_offset: usize) -> Self {
        Self {
            text,
            placeholder,
            caret_offset: Some(caret_offset),
        }
    }
}

impl InsertKind {
    /// Look up an insertion by its toolbar identifier.
    ///
    /// `Custom` takes its text from `custom_content`; it is `None` when the
    /// identifier is `Custom` and no content was given.
    pub fn from_name(name: &str, custom_content: Option<&str>) -> Option<Self> {
        match name {
            "Bold" => Some(InsertKind::Bold),
            "Italic" => Some(InsertKind::Italic),
            "Heading" => Some(InsertKind::Heading),
            "Refrence" | "Reference" => Some(InsertKind::Reference),
            "Link" => Some(InsertKind::Link),
            "Image" => Some(InsertKind::Image),
            "Ul" => Some(InsertKind::UnorderedList),
            "Ol" => Some(InsertKind::OrderedList),
            "Code" => Some(InsertKind::Code),
            "Custom" => custom_content.map(|text| InsertKind::Custom(text.to_string())),
            _ => None,
        }
    }

    /// Build the snippet for the given selected text (empty if none).
    pub fn snippet(&self, selected: &str) -> Snippet {
        // Selected text wins over the placeholder
        let or = |placeholder: &str| -> String {
            if selected.is_empty() {
                placeholder.to_string()
            } else {
                selected.to_string()
            }
        };

        match self {
            InsertKind::Bold => Snippet::new(format!("**{}**", or("Bold Text")), "Bold Text", 2),
            InsertKind::Italic => {
                Snippet::new(format!("*{}*", or("Italic Text")), "Italic Text", 1)
            }
            InsertKind::Heading => Snippet::new(format!("# {}", or("Heading")), "Heading", 2),
            InsertKind::Reference => Snippet::new(format!("> {}", or("Refrence")), "Refrence", 2),
            InsertKind::Link => Snippet::new(format!("[{}](http://)", selected), "", 1),
            InsertKind::Image => Snippet::new("![](http://)".to_string(), "", 2),
            InsertKind::UnorderedList => Snippet::new(format!("- {}", selected), "", 2),
            InsertKind::OrderedList => Snippet::new(format!("1. {}", selected), "", 3),
            InsertKind::Code => Snippet::new(
                format!("```language\r\n{}\r\n```", or("Source Code")),
                "Source Code",
                3,
            ),
            InsertKind::Custom(text) => Snippet {
                text: text.clone(),
                placeholder: "",
                caret_offset: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_without_selection() {
        assert_eq!(InsertKind::Bold.snippet("").text, "**Bold Text**");
        assert_eq!(InsertKind::Italic.snippet("").text, "*Italic Text*");
        assert_eq!(InsertKind::Heading.snippet("").text, "# Heading");
        assert_eq!(InsertKind::Reference.snippet("").text, "> Refrence");
        assert_eq!(InsertKind::Link.snippet("").text, "[](http://)");
        assert_eq!(InsertKind::Image.snippet("").text, "![](http://)");
        assert_eq!(InsertKind::UnorderedList.snippet("").text, "- ");
        assert_eq!(InsertKind::OrderedList.snippet("").text, "1. ");
        assert_eq!(
            InsertKind::Code.snippet("").text,
            "```language\r\nSource Code\r\n```"
        );
    }

    #[test]
    fn test_selection_is_wrapped() {
        assert_eq!(InsertKind::Bold.snippet("word").text, "**word**");
        assert_eq!(InsertKind::Link.snippet("site").text, "[site](http://)");
        assert_eq!(InsertKind::OrderedList.snippet("item").text, "1. item");
        assert_eq!(
            InsertKind::Code.snippet("let x = 1;").text,
            "```language\r\nlet x = 1;\r\n```"
        );
        // Images ignore the selection
        assert_eq!(InsertKind::Image.snippet("alt").text, "![](http://)");
    }

    #[test]
    fn test_caret_offsets() {
        assert_eq!(InsertKind::Bold.snippet("").caret_offset, Some(2));
        assert_eq!(InsertKind::Italic.snippet("").caret_offset, Some(1));
        assert_eq!(InsertKind::Heading.snippet("").caret_offset, Some(2));
        assert_eq!(InsertKind::Reference.snippet("").caret_offset, Some(2));
        assert_eq!(InsertKind::Image.snippet("").caret_offset, Some(2));
        assert_eq!(InsertKind::UnorderedList.snippet("").caret_offset, Some(2));
        assert_eq!(InsertKind::Link.snippet("").caret_offset, Some(1));
        assert_eq!(InsertKind::OrderedList.snippet("").caret_offset, Some(3));
        assert_eq!(InsertKind::Code.snippet("").caret_offset, Some(3));
        assert_eq!(
            InsertKind::Custom("x".to_string()).snippet("").caret_offset,
            None
        );
    }

    #[test]
    fn test_custom_is_verbatim() {
        let snippet = InsertKind::Custom("<!-- more -->".to_string()).snippet("selected");
        assert_eq!(snippet.text, "<!-- more -->");
        assert_eq!(snippet.placeholder, "");
    }

    #[test]
    fn test_from_name() {
        assert_eq!(InsertKind::from_name("Bold", None), Some(InsertKind::Bold));
        assert_eq!(
            InsertKind::from_name("Refrence", None),
            Some(InsertKind::Reference)
        );
        assert_eq!(
            InsertKind::from_name("Ul", None),
            Some(InsertKind::UnorderedList)
        );
        assert_eq!(
            InsertKind::from_name("Custom", Some("hi")),
            Some(InsertKind::Custom("hi".to_string()))
        );
        assert_eq!(InsertKind::from_name("Custom", None), None);
        assert_eq!(InsertKind::from_name("Strike", None), None);
    }
}
