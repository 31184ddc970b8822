use pulldown_cmark::{html, Options, Parser};

use crate::models::Event;

/// Render organizer-authored markdown to an HTML fragment.
pub fn render_markdown(input: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(input, options);
    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}

/// Render the complete visitor-facing page for an event.
///
/// Self-contained document: no scripts, and no external assets beyond
/// whatever the organizer embedded in the content.
pub fn render_event_page(event: &Event) -> String {
    let title = escape_html(&event.title);
    let content = render_markdown(&event.content);

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         <style>\n\
         body{{margin:0;font-family:system-ui,sans-serif;line-height:1.5;color:#1a1a1a}}\n\
         main{{max-width:40rem;margin:0 auto;padding:1rem}}\n\
         img{{max-width:100%;height:auto}}\n\
         table{{border-collapse:collapse}}\n\
         td,th{{border:1px solid #ccc;padding:.25rem .5rem}}\n\
         </style>\n\
         </head>\n\
         <body>\n\
         <main>\n\
         <h1>{title}</h1>\n\
         {content}\
         </main>\n\
         </body>\n\
         </html>\n"
    )
}

/// Titles are plain text; content goes through the markdown renderer instead.
fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
