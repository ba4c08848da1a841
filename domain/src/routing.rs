/// Which orchestration path a free-text send takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Image,
    Optimize,
    Generate,
}

impl Route {
    /// Transient AI message shown while the request is in flight.
    pub fn working_notice(self) -> &'static str {
        match self {
            Route::Image => "Analyzing image and converting to SVG...",
            Route::Optimize => "Optimizing the current SVG...",
            Route::Generate => "Generating SVG from your description...",
        }
    }
}

/// Keyword dispatch. An attached image always wins; otherwise "optimize" or
/// "simplify" anywhere in the text, in any case, picks the optimizer.
pub fn route_message(text: &str, has_image: bool) -> Route {
    if has_image {
        return Route::Image;
    }
    let lower = text.to_lowercase();
    if lower.contains("optimize") || lower.contains("simplify") {
        Route::Optimize
    } else {
        Route::Generate
    }
}
