use crate::call::Call;
use crate::client::CmaClient;
use crate::model::{CmaArray, Entry};
use crate::session::CmaSession;

/// Entry operations.
#[derive(Debug, Clone, Copy)]
pub struct Entries<'a> {
    session: &'a CmaSession,
}

impl<'a> Entries<'a> {
    pub(crate) fn new(session: &'a CmaSession) -> Self {
        Self { session }
    }

    fn client(&self) -> &CmaClient {
        self.session.client()
    }

    /// Create `entry` as an entry of `content_type_id`. An entry that already
    /// has an id is created under that id.
    pub fn create(&self, space_id: &str, content_type_id: &str, entry: &Entry) -> Call<Entry> {
        let request = self.client().build_create_entry(space_id, content_type_id, entry);
        self.session.call(request, CmaClient::parse_resource::<Entry>)
    }

    /// Update an entry. It must carry an id, a space id and `sys.version`.
    pub fn update(&self, entry: &Entry) -> Call<Entry> {
        let request = self.client().build_update(entry);
        self.session.call(request, CmaClient::parse_resource::<Entry>)
    }

    pub fn delete(&self, space_id: &str, entry_id: &str) -> Call<()> {
        let request = self.client().build_delete::<Entry>(space_id, entry_id);
        self.session.call(Ok(request), CmaClient::parse_empty)
    }

    pub fn publish(&self, entry: &Entry) -> Call<Entry> {
        let request = self.client().build_publish(entry);
        self.session.call(request, CmaClient::parse_resource::<Entry>)
    }

    pub fn unpublish(&self, entry: &Entry) -> Call<Entry> {
        let request = self.client().build_unpublish(entry);
        self.session.call(request, CmaClient::parse_resource::<Entry>)
    }

    pub fn archive(&self, entry: &Entry) -> Call<Entry> {
        let request = self.client().build_archive(entry);
        self.session.call(request, CmaClient::parse_resource::<Entry>)
    }

    pub fn unarchive(&self, entry: &Entry) -> Call<Entry> {
        let request = self.client().build_unarchive(entry);
        self.session.call(request, CmaClient::parse_resource::<Entry>)
    }

    pub fn fetch_one(&self, space_id: &str, entry_id: &str) -> Call<Entry> {
        let request = self.client().build_fetch_one::<Entry>(space_id, entry_id);
        self.session.call(Ok(request), CmaClient::parse_resource::<Entry>)
    }

    pub fn fetch_all(&self, space_id: &str) -> Call<CmaArray<Entry>> {
        self.fetch_all_with_query(space_id, std::iter::empty::<(String, String)>())
    }

    /// Fetch entries with query parameters such as `skip`, `limit` or
    /// `content_type`, forwarded verbatim.
    pub fn fetch_all_with_query<I, K, V>(&self, space_id: &str, query: I) -> Call<CmaArray<Entry>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let request = self.client().build_fetch_all::<Entry, _, _, _>(space_id, query);
        self.session.call(Ok(request), CmaClient::parse_array::<Entry>)
    }
}
