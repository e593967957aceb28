//! Template tags and the registry the host uses to construct them.
//!
//! A tag is a named placeholder in a page, written `{% name arguments %}`. The
//! host application registers a factory per tag name at setup time; the page
//! renderer asks the registry to build a tag from the raw argument text each
//! time it meets one.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use crate::errors::Error;

#[cfg(test)]
#[path = "tag_tests.rs"]
mod tests;

/// Render-time context handed to every tag on a page.
#[derive(Clone, Debug, Default)]
pub struct TagContext {
    /// Page variables, e.g. front matter, as a JSON object.
    pub variables: Value,
}

impl TagContext {
    /// Creates a context carrying the given page variables.
    pub fn new(variables: Value) -> Self {
        Self { variables }
    }
}

/// A tag instance constructed from its argument text.
#[async_trait]
pub trait Tag: Send + Sync {
    /// The name the tag was registered under.
    fn name(&self) -> &str;

    /// Produces the text that replaces the tag in the page.
    async fn render(&self, context: &TagContext) -> Result<String, Error>;
}

/// Builds a tag from the raw text that follows its name.
pub type TagFactory = Arc<dyn Fn(&str) -> Result<Box<dyn Tag>, Error> + Send + Sync>;

/// The set of tags a host application knows about.
///
/// There is no global registry: each host builds one during setup and passes
/// it to the [`PageRenderer`](crate::PageRenderer).
#[derive(Clone, Default)]
pub struct TagRegistry {
    factories: HashMap<String, TagFactory>,
}

impl TagRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory under a tag name.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateTag` if a factory is already registered under `name`.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let mut registry = TagRegistry::new();
    /// registry.register("greeting", |args: &str| {
    ///     Ok(Box::new(GreetingTag::new(args)) as Box<dyn Tag>)
    /// })?;
    /// ```
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> Result<(), Error>
    where
        F: Fn(&str) -> Result<Box<dyn Tag>, Error> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.factories.contains_key(&name) {
            return Err(Error::DuplicateTag(name));
        }

        info!(tag = %name, "Registered template tag");
        self.factories.insert(name, Arc::new(factory));
        Ok(())
    }

    /// Returns true if a tag is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Returns the registered tag names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Constructs the tag registered under `name` from its raw argument text.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownTag` if nothing is registered under `name`, or any
    /// error the factory itself returns.
    pub fn create(&self, name: &str, arguments: &str) -> Result<Box<dyn Tag>, Error> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| Error::UnknownTag(name.to_string()))?;

        debug!(tag = name, arguments = arguments, "Constructing template tag");
        factory(arguments)
    }
}

impl fmt::Debug for TagRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagRegistry")
            .field("tags", &self.names())
            .finish()
    }
}
