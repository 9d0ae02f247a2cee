use scraper::{ElementRef, Html, Node};

/// Elements dropped together with their content
const SKIPPED: [&str; 2] = ["script", "style"];

/// Elements that separate lines of text
const BLOCKS: [&str; 9] = ["p", "div", "br", "h1", "h2", "h3", "h4", "h5", "h6"];

/// Convert an HTML page to a single line of readable text.
///
/// Scripts, styles and comments are dropped, every other tag is removed
/// (tags still separate words), and whitespace runs collapse to one space.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let raw = collect_text(document.root_element(), html.len() / 2);

    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

enum Step<'a> {
    Open(ElementRef<'a>),
    Text(&'a str),
    Close(char),
}

// Depth-first walk with an explicit stack; pages can nest arbitrarily deep.
fn collect_text(root: ElementRef<'_>, capacity: usize) -> String {
    let mut out = String::with_capacity(capacity);
    let mut stack = vec![Step::Open(root)];

    while let Some(step) = stack.pop() {
        match step {
            Step::Text(text) => out.push_str(text),
            Step::Close(separator) => out.push(separator),
            Step::Open(element) => {
                let name = element.value().name();
                if SKIPPED.contains(&name) {
                    continue;
                }
                let separator = if BLOCKS.contains(&name) { '\n' } else { ' ' };
                out.push(separator);
                stack.push(Step::Close(separator));

                let children: Vec<_> = element.children().collect();
                for child in children.into_iter().rev() {
                    match child.value() {
                        Node::Text(text) => stack.push(Step::Text(&**text)),
                        Node::Element(_) => {
                            if let Some(child_element) = ElementRef::wrap(child) {
                                stack.push(Step::Open(child_element));
                            }
                        }
                        // Comments, doctypes, processing instructions
                        _ => {}
                    }
                }
            }
        }
    }

    out
}
