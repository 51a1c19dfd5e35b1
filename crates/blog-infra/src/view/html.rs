//! Server-side HTML pages for the blog templates.

use std::fmt::Write;

use blog_core::domain::Post;
use blog_core::ports::{RenderError, Route, Template, ViewContext, ViewRenderer};

/// Renders each [`Template`] into a complete HTML document.
///
/// All user-supplied text is escaped.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    site_title: String,
}

impl HtmlRenderer {
    pub fn new(site_title: impl Into<String>) -> Self {
        Self {
            site_title: site_title.into(),
        }
    }

    fn page(&self, heading: &str, body: &str) -> String {
        format!(
            "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{site} | {heading}</title>\n</head>\n<body>\n\
             <nav><a href=\"{list}\">{site}</a> <a href=\"{create}\">New post</a></nav>\n\
             <h1>{heading}</h1>\n{body}</body>\n</html>\n",
            site = escape(&self.site_title),
            heading = escape(heading),
            list = Route::PostList.path(),
            create = Route::PostCreate.path(),
        )
    }

    fn post_list(&self, posts: &[Post]) -> Result<String, RenderError> {
        let mut body = String::new();
        if posts.is_empty() {
            body.push_str("<p>No posts yet.</p>\n");
        } else {
            body.push_str("<ul>\n");
            for post in posts {
                writeln!(
                    body,
                    "<li><a href=\"{detail}\">{title}</a> by {author} \
                     <form method=\"post\" action=\"{delete}\">\
                     <button type=\"submit\">Delete</button></form></li>",
                    detail = Route::PostDetail(post.id).path(),
                    title = escape(&post.title),
                    author = escape(&post.author),
                    delete = Route::PostDelete(post.id).path(),
                )?;
            }
            body.push_str("</ul>\n");
        }
        Ok(self.page("Posts", &body))
    }

    fn post_detail(&self, post: &Post) -> Result<String, RenderError> {
        let mut body = String::new();
        writeln!(
            body,
            "<article>\n<h2>{title}</h2>\n<p>by {author}, {created}</p>\n\
             <div>{text}</div>\n</article>",
            title = escape(&post.title),
            author = escape(&post.author),
            created = post.created_at.format("%Y-%m-%d %H:%M"),
            text = escape(&post.text),
        )?;
        writeln!(
            body,
            "<a href=\"{edit}\">Edit</a>",
            edit = Route::PostEdit(post.id).path()
        )?;
        Ok(self.page(&post.title, &body))
    }

    fn post_form(&self, heading: &str, action: Route, title: &str, text: &str) -> String {
        let body = format!(
            "<form method=\"post\" action=\"{action}\">\n\
             <input type=\"text\" name=\"title\" value=\"{title}\">\n\
             <textarea name=\"text\">{text}</textarea>\n\
             <button type=\"submit\">Save</button>\n\
             </form>\n",
            action = action.path(),
            title = escape(title),
            text = escape(text),
        );
        self.page(heading, &body)
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new("Blog")
    }
}

impl ViewRenderer for HtmlRenderer {
    fn render(&self, template: Template, context: &ViewContext) -> Result<String, RenderError> {
        match (template, context) {
            (Template::PostList, ViewContext::Posts(posts)) => self.post_list(posts),
            (Template::PostDetail, ViewContext::Post(post)) => self.post_detail(post),
            (Template::PostCreate, _) => Ok(self.post_form("New post", Route::PostCreate, "", "")),
            (Template::PostEdit, ViewContext::Post(post)) => Ok(self.post_form(
                "Edit post",
                Route::PostEdit(post.id),
                &post.title,
                &post.text,
            )),
            (Template::PostList, _) => Err(mismatch(template, "posts")),
            (Template::PostDetail | Template::PostEdit, _) => Err(mismatch(template, "a post")),
        }
    }
}

fn mismatch(template: Template, expected: &'static str) -> RenderError {
    RenderError::ContextMismatch {
        template: template.name(),
        expected,
    }
}

/// Escape text for use in element content and quoted attribute values.
fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
