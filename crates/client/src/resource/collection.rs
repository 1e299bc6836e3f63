//! [`Collection`]: a filtered, paginated view over models of one entity type.
//!
//! # Paging
//!
//! Page indices are zero-based and `offset = page * max`. A page size of 0
//! means "unpaged": one call returns the whole result set and no paging
//! parameters are sent.
//!
//! The total item count (`size`) and page count (`totalPages`) are unknown
//! until the first fetch completes; they are then taken verbatim from each
//! response. A response that does not report `size` is rejected rather than
//! counted. Page bounds are checked before the call when the page count is
//! known, and again after the response otherwise. Changing the filter, domain,
//! page size or a declared parameter forgets both counts.
//!
//! # Concurrency
//!
//! Page requests are strictly sequential. Mutating a collection while one of
//! its fetches is in flight is not supported; `&mut self` on every fetch
//! makes this a compile-time rule for safe code.
//!
//! # Failures
//!
//! A remote failure in the middle of [`Collection::fetch_all`] aborts the loop
//! and leaves the pages fetched so far in place; nothing is rolled back.

use std::any::Any;
use std::ops::Index;

use serde::de::Error as _;
use serde::ser::{Error as _, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

use crate::client::ResourceClient;
use crate::error::{ClientError, Result};
use crate::resource::domain::DomainRef;
use crate::resource::entity::Entity;
use crate::resource::model::Model;
use crate::serde_helpers::opt_u64_from_string_or_number;

/// Single active scoping filter, e.g. `project = 42`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Filter {
    pub key: &'static str,
    pub value: u64,
}

/// Collection endpoint envelope, as received.
#[derive(Debug, Deserialize)]
struct RawCollectionPage {
    collection: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "opt_u64_from_string_or_number")]
    size: Option<u64>,
    #[serde(
        rename = "totalPages",
        default,
        deserialize_with = "opt_u64_from_string_or_number"
    )]
    total_pages: Option<u64>,
}

/// One page of a collection response with its server-reported counts.
#[derive(Debug)]
struct CollectionPage {
    collection: Vec<Value>,
    size: u64,
    total_pages: u64,
}

impl CollectionPage {
    /// Accept the envelope, or a bare array as the complete result set of an
    /// unpaged request.
    ///
    /// An envelope must carry both `collection` and `size`; only a missing
    /// `totalPages` is derived, from `size`.
    fn parse(response: Value, max: usize) -> Result<Self> {
        match response {
            Value::Array(items) if max == 0 => {
                let size = items.len() as u64;
                Ok(Self {
                    collection: items,
                    size,
                    total_pages: page_count(size, 0),
                })
            }
            Value::Array(_) => Err(ClientError::InvalidResponse(format!(
                "expected a collection envelope for a paged request (max={}), got a bare array",
                max
            ))),
            Value::Object(_) => {
                let raw: RawCollectionPage = serde_json::from_value(response)?;
                let collection = raw.collection.ok_or_else(|| {
                    ClientError::InvalidResponse(
                        "collection envelope has no `collection` array".to_string(),
                    )
                })?;
                let size = raw.size.ok_or_else(|| {
                    ClientError::InvalidResponse(
                        "collection envelope has no `size` total".to_string(),
                    )
                })?;
                Ok(Self {
                    collection,
                    size,
                    total_pages: raw.total_pages.unwrap_or_else(|| page_count(size, max)),
                })
            }
            other => Err(ClientError::InvalidResponse(format!(
                "expected a collection envelope, got {}",
                other
            ))),
        }
    }
}

/// `ceil(total / max)`; a single page when unpaged.
fn page_count(total: u64, max: usize) -> u64 {
    match max as u64 {
        0 => u64::from(total > 0),
        max => total.div_ceil(max),
    }
}

/// Ordered, paginated models of entity type `E`.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<E> {
    models: Vec<Model<E>>,
    filter: Option<Filter>,
    domain: Option<DomainRef>,
    max: usize,
    offset: usize,
    page: usize,
    total: Option<u64>,
    nb_pages: Option<u64>,
    params: Vec<(&'static str, Value)>,
}

impl<E: Entity> Default for Collection<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Collection<E> {
    /// An empty, unpaged, unfiltered collection with all declared query
    /// parameters unset.
    pub fn new() -> Self {
        Self {
            models: Vec::new(),
            filter: None,
            domain: None,
            max: 0,
            offset: 0,
            page: 0,
            total: None,
            nb_pages: None,
            params: E::QUERY_PARAMS.iter().map(|name| (*name, Value::Null)).collect(),
        }
    }

    /// Set the page size; 0 fetches everything in one call.
    pub fn with_max(mut self, max: usize) -> Self {
        self.set_max(max);
        self
    }

    pub fn with_filter(mut self, key: &str, value: u64) -> Result<Self> {
        self.set_filter(key, value)?;
        Ok(self)
    }

    pub fn with_param(mut self, name: &str, value: impl Into<Value>) -> Result<Self> {
        self.set_param(name, value)?;
        Ok(self)
    }

    /// Replace the active filter.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidFilter`] if `key` is not in the element
    /// type's allow-list; the previous filter is kept in that case.
    ///
    /// Like every change of scope, this forgets the page cursor and the
    /// totals of the previous result set.
    pub fn set_filter(&mut self, key: &str, value: u64) -> Result<()> {
        let key = E::FILTERS
            .iter()
            .copied()
            .find(|allowed| *allowed == key)
            .ok_or_else(|| ClientError::InvalidFilter {
                key: key.to_string(),
                entity: E::RESOURCE,
            })?;
        self.filter = Some(Filter { key, value });
        self.reset_paging();
        Ok(())
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
        self.reset_paging();
    }

    pub fn filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    pub fn domain(&self) -> Option<&DomainRef> {
        self.domain.as_ref()
    }

    pub(crate) fn set_domain_ref(&mut self, domain: DomainRef) {
        self.domain = Some(domain);
        self.reset_paging();
    }

    /// Set a declared query parameter; `Value::Null` unsets it.
    pub fn set_param(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let slot = self
            .params
            .iter_mut()
            .find(|(declared, _)| *declared == name)
            .ok_or_else(|| ClientError::UnknownParameter {
                name: name.to_string(),
                entity: E::RESOURCE,
            })?;
        slot.1 = value.into();
        self.reset_paging();
        Ok(())
    }

    /// Current value of a declared query parameter.
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params
            .iter()
            .find(|(declared, _)| *declared == name)
            .map(|(_, value)| value)
    }

    /// All declared query parameters, in declaration order.
    pub fn params(&self) -> &[(&'static str, Value)] {
        &self.params
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn set_max(&mut self, max: usize) {
        self.max = max;
        self.reset_paging();
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    /// Server-reported total item count, once fetched.
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Server-reported page count, once fetched.
    pub fn nb_pages(&self) -> Option<u64> {
        self.nb_pages
    }

    /// Whether a page after the current one is known to exist.
    pub fn has_next_page(&self) -> bool {
        self.nb_pages
            .is_some_and(|pages| (self.page as u64).saturating_add(1) < pages)
    }

    /// Collection endpoint path for the current filter/domain.
    pub fn uri(&self) -> Result<String> {
        E::collection_uri(self)
    }

    /// Query pairs sent with a fetch: paging (when paged) then declared params.
    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if self.max > 0 {
            pairs.push(("max".to_string(), self.max.to_string()));
            pairs.push(("offset".to_string(), self.offset.to_string()));
        }
        pairs.extend(E::collection_params(self));
        pairs
    }

    /// Fetch one page, replacing the models or appending to them.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::PageOutOfBounds`] before the call when the page
    /// count is known and `page` is outside it (page 0 is always allowed), or
    /// after the call when the response reveals it. In the latter case the
    /// totals are updated but the models are left untouched. On any failure
    /// the page cursor stays where it was.
    pub async fn fetch_page(
        &mut self,
        client: &dyn ResourceClient,
        page: usize,
        append: bool,
    ) -> Result<()> {
        self.check_page(page)?;
        self.ensure_fetchable()?;

        let cursor = (self.page, self.offset);
        self.page = page;
        self.offset = page.saturating_mul(self.max);
        let result = match self.request(client).await {
            Ok(items) => self.check_page(page).and_then(|()| self.apply(items, append)),
            Err(err) => Err(err),
        };
        if result.is_err() {
            (self.page, self.offset) = cursor;
        }
        result
    }

    pub async fn fetch_next_page(
        &mut self,
        client: &dyn ResourceClient,
        append: bool,
    ) -> Result<()> {
        self.fetch_page(client, self.page.saturating_add(1), append)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::PageOutOfBounds`] when already on page 0.
    pub async fn fetch_previous_page(
        &mut self,
        client: &dyn ResourceClient,
        append: bool,
    ) -> Result<()> {
        let page = self
            .page
            .checked_sub(1)
            .ok_or(ClientError::PageOutOfBounds {
                page: -1,
                pages: self.nb_pages,
            })?;
        self.fetch_page(client, page, append).await
    }

    /// Fetch the whole result set.
    ///
    /// Unpaged collections issue exactly one call. Paged collections fetch
    /// page 0, then successive pages in order, appending, until the number of
    /// models reaches the total reported by the first response. The page
    /// count of that first response bounds the loop.
    pub async fn fetch_all(&mut self, client: &dyn ResourceClient) -> Result<()> {
        if self.max == 0 {
            self.ensure_fetchable()?;
            self.page = 0;
            self.offset = 0;
            let response = self.request(client).await?;
            return self.apply(response, false);
        }

        self.fetch_page(client, 0, false).await?;
        let total = self.total.unwrap_or(0);
        let pages = self.nb_pages.unwrap_or(0);

        let mut page = 0;
        while (self.models.len() as u64) < total && ((page + 1) as u64) < pages {
            page += 1;
            debug!(
                entity = E::RESOURCE,
                page,
                offset = page * self.max,
                fetched = self.models.len(),
                total,
                "Fetching next page"
            );
            self.fetch_page(client, page, true).await?;
        }
        Ok(())
    }

    /// POST every model in one request.
    ///
    /// The server answers with a single aggregate acknowledgement, returned
    /// verbatim: there is no per-item result, so from the caller's point of
    /// view the batch either fails or succeeds as a whole.
    pub async fn save(&self, client: &dyn ResourceClient) -> Result<Value> {
        if !E::BULK_SAVE {
            return Err(ClientError::Unsupported {
                operation: "bulk save",
                entity: E::RESOURCE,
            });
        }

        let uri = self.unfiltered_uri()?;
        let body = self
            .models
            .iter()
            .map(Model::public_properties)
            .collect::<Result<Vec<_>>>()?;
        debug!(entity = E::RESOURCE, %uri, count = body.len(), "Saving collection");
        client.post(&uri, &Value::Array(body)).await
    }

    /// Copy of the scoping (filter, domain), page size and declared query
    /// parameters. Fetched models and the page cursor are not copied.
    pub fn clone_query(&self) -> Self {
        Self {
            filter: self.filter,
            domain: self.domain.clone(),
            max: self.max,
            params: self.params.clone(),
            ..Self::new()
        }
    }

    /// Append a model locally. Nothing is persisted.
    pub fn push(&mut self, model: Model<E>) {
        self.models.push(model);
    }

    /// Append a dynamically typed item.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::TypeMismatch`] unless the item is a `Model<E>`.
    pub fn push_any(&mut self, item: Box<dyn Any>) -> Result<()> {
        let model = item
            .downcast::<Model<E>>()
            .map_err(|_| ClientError::TypeMismatch {
                expected: E::RESOURCE,
            })?;
        self.models.push(*model);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Model<E>> {
        self.models.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Model<E>> {
        self.models.iter()
    }

    pub fn models(&self) -> &[Model<E>] {
        &self.models
    }

    pub fn into_models(self) -> Vec<Model<E>> {
        self.models
    }

    fn unfiltered_uri(&self) -> Result<String> {
        if self.filter.is_none() {
            return self.uri();
        }
        let mut unfiltered = self.clone_query();
        unfiltered.filter = None;
        unfiltered.uri()
    }

    fn check_page(&self, page: usize) -> Result<()> {
        match self.nb_pages {
            Some(pages) if page != 0 && page as u64 >= pages => Err(ClientError::PageOutOfBounds {
                page: page as i64,
                pages: Some(pages),
            }),
            _ => Ok(()),
        }
    }

    fn ensure_fetchable(&self) -> Result<()> {
        if self.filter.is_none() && self.domain.is_none() && !E::UNFILTERED && !E::DOMAIN_SCOPED {
            return Err(ClientError::FilterRequired {
                entity: E::RESOURCE,
            });
        }
        Ok(())
    }

    /// One GET at the current offset; records the server-reported totals.
    async fn request(&mut self, client: &dyn ResourceClient) -> Result<Vec<Value>> {
        let uri = self.uri()?;
        let params = self.query_params();
        debug!(entity = E::RESOURCE, %uri, page = self.page, "Fetching collection");

        let response = client.get(&uri, &params).await?;
        let page = CollectionPage::parse(response, self.max)?;
        self.total = Some(page.size);
        self.nb_pages = Some(page.total_pages);
        Ok(page.collection)
    }

    fn reset_paging(&mut self) {
        self.page = 0;
        self.offset = 0;
        self.total = None;
        self.nb_pages = None;
    }

    fn apply(&mut self, items: Vec<Value>, append: bool) -> Result<()> {
        let models = items
            .into_iter()
            .map(Model::from_value)
            .collect::<Result<Vec<_>>>()?;
        if append {
            self.models.extend(models);
        } else {
            self.models = models;
        }
        Ok(())
    }
}

impl<E> Index<usize> for Collection<E> {
    type Output = Model<E>;

    fn index(&self, index: usize) -> &Model<E> {
        &self.models[index]
    }
}

impl<E> IntoIterator for Collection<E> {
    type Item = Model<E>;
    type IntoIter = std::vec::IntoIter<Model<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.models.into_iter()
    }
}

impl<'a, E> IntoIterator for &'a Collection<E> {
    type Item = &'a Model<E>;
    type IntoIter = std::slice::Iter<'a, Model<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.models.iter()
    }
}

/// Wrap plain models into a collection of their type.
impl<E: Entity> From<Vec<Model<E>>> for Collection<E> {
    fn from(models: Vec<Model<E>>) -> Self {
        Self {
            models,
            ..Self::new()
        }
    }
}

impl<E: Entity> FromIterator<Model<E>> for Collection<E> {
    fn from_iter<I: IntoIterator<Item = Model<E>>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<E: Entity> Extend<Model<E>> for Collection<E> {
    fn extend<I: IntoIterator<Item = Model<E>>>(&mut self, iter: I) {
        self.models.extend(iter);
    }
}

/// Nested collections serialize as an array of public properties.
impl<E: Entity> Serialize for Collection<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.models.len()))?;
        for model in &self.models {
            let value = model.public_properties().map_err(S::Error::custom)?;
            seq.serialize_element(&value)?;
        }
        seq.end()
    }
}

/// Nested collections deserialize from a plain array of item objects.
impl<'de, E: Entity> Deserialize<'de> for Collection<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let items = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
        items
            .into_iter()
            .map(Model::from_value)
            .collect::<Result<Collection<E>>>()
            .map_err(D::Error::custom)
    }
}
