use crate::definition::{CatalogIndex, DefinitionTable};
use crate::error::Result;

/// Source of catalog data.
///
/// Implementations report transport failures and non-success responses as
/// [`Error::NetworkError`](crate::Error::NetworkError). No retry is expected.
pub trait CatalogGateway {
    /// Fetch the catalog index listing every locale and table path
    fn fetch_index(&self) -> Result<CatalogIndex>;

    /// Fetch one definition table by the resource path found in the index
    fn fetch_table(&self, path: &str) -> Result<DefinitionTable>;
}

impl<G: CatalogGateway + ?Sized> CatalogGateway for &G {
    fn fetch_index(&self) -> Result<CatalogIndex> {
        (**self).fetch_index()
    }

    fn fetch_table(&self, path: &str) -> Result<DefinitionTable> {
        (**self).fetch_table(path)
    }
}

impl<G: CatalogGateway + ?Sized> CatalogGateway for Box<G> {
    fn fetch_index(&self) -> Result<CatalogIndex> {
        (**self).fetch_index()
    }

    fn fetch_table(&self, path: &str) -> Result<DefinitionTable> {
        (**self).fetch_table(path)
    }
}
