//! View port - what a handler asks the presentation layer to do.

use crate::domain::{Post, PostId};

/// Named templates the handler can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    PostList,
    PostDetail,
    PostCreate,
    PostEdit,
}

impl Template {
    pub fn name(&self) -> &'static str {
        match self {
            Template::PostList => "blog/post_list.html",
            Template::PostDetail => "blog/post_detail.html",
            Template::PostCreate => "blog/post_create.html",
            Template::PostEdit => "blog/post_edit.html",
        }
    }
}

/// Named routes the handler can redirect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    PostList,
    PostDetail(PostId),
    PostCreate,
    PostEdit(PostId),
    PostDelete(PostId),
}

impl Route {
    /// Resolve the route to its URL path.
    pub fn path(&self) -> String {
        match self {
            Route::PostList => "/".to_string(),
            Route::PostDetail(id) => format!("/{id}/"),
            Route::PostCreate => "/create/".to_string(),
            Route::PostEdit(id) => format!("/{id}/edit/"),
            Route::PostDelete(id) => format!("/{id}/delete/"),
        }
    }
}

/// Data handed to a template.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewContext {
    Empty,
    Posts(Vec<Post>),
    Post(Post),
}

/// Outcome of a handler operation.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Render {
        template: Template,
        context: ViewContext,
    },
    Redirect(Route),
    /// The operation does nothing for this request method.
    Unhandled,
}

impl View {
    pub fn render(template: Template, context: ViewContext) -> Self {
        View::Render { template, context }
    }
}

/// Renders templates into response bodies.
pub trait ViewRenderer: Send + Sync {
    fn render(&self, template: Template, context: &ViewContext) -> Result<String, RenderError>;
}

/// Rendering errors.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Template {template} expects {expected} in its context")]
    ContextMismatch {
        template: &'static str,
        expected: &'static str,
    },

    #[error("Failed to write template output: {0}")]
    Write(#[from] std::fmt::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::PostList.path(), "/");
        assert_eq!(Route::PostDetail(3).path(), "/3/");
        assert_eq!(Route::PostCreate.path(), "/create/");
        assert_eq!(Route::PostEdit(35).path(), "/35/edit/");
        assert_eq!(Route::PostDelete(35).path(), "/35/delete/");
    }
}
