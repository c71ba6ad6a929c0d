//! Site routes and their human-readable titles.

/// The site's pages: three static ones plus the dynamic introductions page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Introduction,
    Contract,
    Introductions,
}

impl Route {
    pub const ALL: [Route; 4] = [
        Route::Home,
        Route::Introduction,
        Route::Contract,
        Route::Introductions,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Introduction => "/introduction",
            Route::Contract => "/contract",
            Route::Introductions => "/introductions",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Introduction => "Introduction",
            Route::Contract => "Contract",
            Route::Introductions => "Student Introductions",
        }
    }

    /// Parse a route path. Trailing slashes and a missing leading slash are
    /// tolerated; unknown paths yield `None`.
    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim().trim_matches('/');
        Route::ALL
            .into_iter()
            .find(|r| r.path().trim_matches('/') == trimmed)
    }

    pub fn next(self) -> Route {
        let i = self.index();
        Route::ALL[(i + 1) % Route::ALL.len()]
    }

    pub fn prev(self) -> Route {
        let n = Route::ALL.len();
        Route::ALL[(self.index() + n - 1) % n]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Window title shown while this route is active.
    pub fn page_title(self, site_title: &str) -> String {
        format!("{} || {}", self.title(), site_title)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}
