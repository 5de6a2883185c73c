//! Markdown to HTML conversion with pluggable token renderers
//!
//! [`ComrakConverter`] parses with comrak, renders the delegated tokens
//! (code blocks, tables, list items) through a [`TokenRenderers`] table and
//! splices the results back into the AST as raw HTML blocks before the final
//! HTML pass. Nodes are visited deepest first, so a list item's HTML already
//! contains its rendered nested lists and code blocks.

use super::escape_html;
use super::renderers::TokenRenderers;
use crate::config::RendererOptions;
use crate::error::{Error, Result};
use comrak::nodes::{AstNode, NodeHtmlBlock, NodeValue};
use comrak::{format_html, parse_document, Arena, Options};
use log::debug;

/// Converts markdown into HTML.
pub trait MarkdownConverter {
    fn convert(
        &self,
        markdown: &str,
        options: &RendererOptions,
        renderers: &dyn TokenRenderers,
    ) -> Result<String>;
}

/// Converter backed by comrak.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComrakConverter;

/// Tokens delegated to the renderer table.
enum Delegated {
    Code { literal: String, language: Option<String> },
    Table,
    Item,
}

impl MarkdownConverter for ComrakConverter {
    fn convert(
        &self,
        markdown: &str,
        options: &RendererOptions,
        renderers: &dyn TokenRenderers,
    ) -> Result<String> {
        let arena = Arena::new();
        let comrak_options = to_comrak_options(options);
        let root = parse_document(&arena, markdown, &comrak_options);

        if options.sanitize {
            escape_raw_html(root);
        }

        // Reversed pre-order visits descendants before their ancestors
        let nodes: Vec<&AstNode> = root.descendants().collect();
        let mut replaced = 0;
        for node in nodes.into_iter().rev() {
            let delegated = match &node.data.borrow().value {
                NodeValue::CodeBlock(block) => Some(Delegated::Code {
                    literal: block.literal.clone(),
                    language: fence_language(&block.info),
                }),
                NodeValue::Table(_) => Some(Delegated::Table),
                NodeValue::Item(_) => Some(Delegated::Item),
                _ => None,
            };

            let html = match delegated {
                Some(Delegated::Code { literal, language }) => {
                    renderers.code(&literal, language.as_deref())
                }
                Some(Delegated::Table) => render_table(node, &comrak_options, renderers)?,
                Some(Delegated::Item) => render_list_item(node, &comrak_options, renderers)?,
                None => continue,
            };
            replace_with_html(node, html);
            replaced += 1;
        }

        debug!(
            "Converted {} bytes of markdown ({} delegated tokens)",
            markdown.len(),
            replaced
        );
        format_node(root, &comrak_options)
    }
}

/// Build comrak options from the renderer options.
fn to_comrak_options(options: &RendererOptions) -> Options {
    let mut comrak_options = Options::default();

    comrak_options.extension.table = options.gfm;
    comrak_options.extension.strikethrough = options.gfm;
    comrak_options.extension.autolink = options.gfm;
    comrak_options.parse.smart = options.smartypants;
    comrak_options.render.hardbreaks = options.breaks;

    // Delegated tokens come back as raw HTML blocks
    comrak_options.render.unsafe_ = true;

    comrak_options
}

/// First word of a fence info string.
fn fence_language(info: &str) -> Option<String> {
    info.split_whitespace().next().map(|lang| lang.to_string())
}

/// Turn raw HTML in the document into visible text.
fn escape_raw_html<'a>(root: &'a AstNode<'a>) {
    for node in root.descendants() {
        let mut ast = node.data.borrow_mut();
        match &mut ast.value {
            NodeValue::HtmlBlock(block) => block.literal = escape_html(&block.literal),
            NodeValue::HtmlInline(html) => *html = escape_html(html),
            _ => {}
        }
    }
}

/// Render a single node (and its children) to HTML.
fn format_node<'a>(node: &'a AstNode<'a>, options: &Options) -> Result<String> {
    let mut output = Vec::new();
    format_html(node, options, &mut output).map_err(|e| Error::Render(e.to_string()))?;
    String::from_utf8(output).map_err(|e| Error::Render(e.to_string()))
}

fn render_table<'a>(
    table: &'a AstNode<'a>,
    options: &Options,
    renderers: &dyn TokenRenderers,
) -> Result<String> {
    let mut header = String::new();
    let mut body = String::new();

    for row in table.children() {
        let is_header = matches!(row.data.borrow().value, NodeValue::TableRow(true));

        let mut html = String::from("<tr>\n");
        for cell in row.children() {
            html.push_str(format_node(cell, options)?.trim());
            html.push('\n');
        }
        html.push_str("</tr>\n");

        if is_header {
            header.push_str(&html);
        } else {
            body.push_str(&html);
        }
    }

    Ok(renderers.table(&header, &body))
}

fn render_list_item<'a>(
    item: &'a AstNode<'a>,
    options: &Options,
    renderers: &dyn TokenRenderers,
) -> Result<String> {
    let html = format_node(item, options)?;
    let html = html.trim();
    let inner = html
        .strip_prefix("<li>")
        .and_then(|rest| rest.strip_suffix("</li>"))
        .unwrap_or(html);
    Ok(renderers.list_item(inner))
}

/// Turn `node` into a raw HTML block holding `html`.
fn replace_with_html<'a>(node: &'a AstNode<'a>, html: String) {
    let children: Vec<&AstNode> = node.children().collect();
    for child in children {
        child.detach();
    }
    node.data.borrow_mut().value = NodeValue::HtmlBlock(NodeHtmlBlock {
        block_type: 0,
        literal: html,
    });
}
