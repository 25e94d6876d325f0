use chrono::DateTime;
use pulldown_cmark::{Event, Options, Parser, html};

pub const DEFAULT_IMAGE: &str = "https://images.unsplash.com/photo-1432821596592-e2c18b78144f?q=80&w=1000&auto=format&fit=crop";

const EXCERPT_CHARS: usize = 250;

/// Экран приложения. Навигация идёт через сигнал с этим значением.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Detail(String),
    Create,
    Edit(String),
}

pub fn cover_image(image_url: &str) -> &str {
    if image_url.trim().is_empty() {
        DEFAULT_IMAGE
    } else {
        image_url
    }
}

/// Текст для карточки: без markdown-разметки, в одну строку, до 250 символов.
pub fn excerpt(content: &str) -> String {
    let plain: String = content
        .chars()
        .filter(|c| !matches!(c, '#' | '*' | '`' | '_' | '~' | '[' | ']'))
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();

    if plain.chars().count() <= EXCERPT_CHARS {
        return plain;
    }
    let mut truncated: String = plain.chars().take(EXCERPT_CHARS).collect();
    truncated.push_str("...");
    truncated
}

/// Markdown в HTML. Сырой HTML из текста поста выводится как текст.
pub fn render_markdown(content: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(content, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut output = String::with_capacity(content.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

pub fn format_date(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|date| date.format("%b %d, %Y").to_string())
        .unwrap_or_else(|_| "Invalid date".to_string())
}

pub fn validate_form(title: &str, content: &str) -> Result<(), &'static str> {
    if title.trim().is_empty() || content.trim().is_empty() {
        return Err("Заполните заголовок и текст поста");
    }
    Ok(())
}

/// Варианты категории для формы: теги плюс текущая категория поста, если её нет среди тегов.
pub fn category_options(tags: &[String], current: &str) -> Vec<String> {
    let mut options = tags.to_vec();
    if !current.trim().is_empty() && !options.iter().any(|tag| tag == current) {
        options.push(current.to_string());
    }
    options
}
