//! Selects the items a user asked for out of a stream of dump documents.

use serde_json::Value;

use crate::document::{ResourceDocument, ResourceItem};
use crate::error::Result;
use crate::registry::{self, ResourceType};

/* ============================= QUERY ============================= */

/// What the user asked for: one resource type plus optional filters.
#[derive(Debug, Clone)]
pub struct Query {
    pub resource: &'static ResourceType,
    pub namespace: Option<String>,
    pub name: Option<String>,
    pub all_namespaces: bool,
}

impl Query {
    /// Build a query from a command-line type token such as `po` or `deploy`.
    pub fn new(
        token: &str,
        namespace: Option<String>,
        name: Option<String>,
        all_namespaces: bool,
    ) -> Result<Self> {
        Ok(Self {
            resource: registry::lookup(token)?,
            namespace: namespace.filter(|ns| !ns.is_empty()),
            name: name.filter(|n| !n.is_empty()),
            all_namespaces,
        })
    }

    /// Namespace that actually restricts the result, if any.
    pub fn effective_namespace(&self) -> Option<&str> {
        if self.resource.is_cluster_scoped() || self.all_namespaces {
            None
        } else {
            self.namespace.as_deref()
        }
    }

    /// Whether a document can hold items of the queried kind.
    pub fn is_relevant(&self, doc: &ResourceDocument) -> bool {
        doc.is_generic_list() || doc.kind == self.resource.list_kind()
    }

    /// Whether an item of a relevant document passes the filters.
    pub fn matches(&self, doc: &ResourceDocument, item: &Value) -> bool {
        if doc.is_generic_list() && item["kind"].as_str() != Some(self.resource.name) {
            return false;
        }
        let metadata = &item["metadata"];
        if let Some(ns) = self.effective_namespace() {
            if metadata["namespace"].as_str() != Some(ns) {
                return false;
            }
        }
        match &self.name {
            Some(name) => metadata["name"].as_str() == Some(name.as_str()),
            None => true,
        }
    }

    /// Items of `doc` selected by this query, in array order.
    pub fn select<'a>(&'a self, doc: &'a ResourceDocument) -> impl Iterator<Item = &'a Value> + 'a {
        let relevant = self.is_relevant(doc);
        doc.items
            .iter()
            .filter(move |item| relevant && self.matches(doc, item))
    }
}

/* ============================= COLLECTOR ============================= */

/// Accumulates selected items across documents, preserving order.
#[derive(Debug)]
pub struct Selection<'q> {
    query: &'q Query,
    items: Vec<ResourceItem>,
}

impl<'q> Selection<'q> {
    pub fn new(query: &'q Query) -> Self {
        Self {
            query,
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, doc: ResourceDocument) {
        let query = self.query;
        self.items
            .extend(query.select(&doc).cloned().map(ResourceItem::new));
    }

    pub fn into_items(self) -> Vec<ResourceItem> {
        self.items
    }
}

/// Run `query` over `docs` and return the surviving items.
pub fn filter_documents<I>(query: &Query, docs: I) -> Vec<ResourceItem>
where
    I: IntoIterator<Item = ResourceDocument>,
{
    let mut selection = Selection::new(query);
    for doc in docs {
        selection.push(doc);
    }
    selection.into_items()
}

/* ============================= TESTS ============================= */
