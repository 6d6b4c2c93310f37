//! The host URL seam.

use url::Url;

/// A mutable page location whose query string carries the wallet.
///
/// `replace_query` rewrites the current location in place; it must not push
/// a new navigation entry. A browser host implements this over
/// `history.replaceState`.
pub trait Location {
    /// The path component, always starting with `/` for hierarchical URLs.
    fn path(&self) -> &str;

    /// The query string without its leading `?`, or `None` if there is none.
    fn query(&self) -> Option<&str>;

    /// Replaces the query string. `None` restores the bare path.
    fn replace_query(&mut self, query: Option<&str>);

    /// Removes the query string.
    fn clear_query(&mut self) {
        self.replace_query(None);
    }

    /// The full serialized location.
    fn href(&self) -> String;
}

impl Location for Url {
    fn path(&self) -> &str {
        Url::path(self)
    }

    fn query(&self) -> Option<&str> {
        Url::query(self)
    }

    fn replace_query(&mut self, query: Option<&str>) {
        self.set_query(query.filter(|q| !q.is_empty()));
    }

    fn href(&self) -> String {
        self.as_str().to_string()
    }
}

impl<L: Location + ?Sized> Location for &mut L {
    fn path(&self) -> &str {
        (**self).path()
    }

    fn query(&self) -> Option<&str> {
        (**self).query()
    }

    fn replace_query(&mut self, query: Option<&str>) {
        (**self).replace_query(query);
    }

    fn href(&self) -> String {
        (**self).href()
    }
}
