use crate::call::Call;
use crate::client::CmaClient;
use crate::model::{CmaArray, ContentType};
use crate::session::CmaSession;

/// Content type operations.
#[derive(Debug, Clone, Copy)]
pub struct ContentTypes<'a> {
    session: &'a CmaSession,
}

impl<'a> ContentTypes<'a> {
    pub(crate) fn new(session: &'a CmaSession) -> Self {
        Self { session }
    }

    fn client(&self) -> &CmaClient {
        self.session.client()
    }

    pub fn create(&self, space_id: &str, content_type: &ContentType) -> Call<ContentType> {
        let request = self.client().build_create(space_id, content_type);
        self.session.call(request, CmaClient::parse_resource::<ContentType>)
    }

    pub fn update(&self, content_type: &ContentType) -> Call<ContentType> {
        let request = self.client().build_update(content_type);
        self.session.call(request, CmaClient::parse_resource::<ContentType>)
    }

    pub fn delete(&self, space_id: &str, content_type_id: &str) -> Call<()> {
        let request = self.client().build_delete::<ContentType>(space_id, content_type_id);
        self.session.call(Ok(request), CmaClient::parse_empty)
    }

    pub fn publish(&self, content_type: &ContentType) -> Call<ContentType> {
        let request = self.client().build_publish(content_type);
        self.session.call(request, CmaClient::parse_resource::<ContentType>)
    }

    pub fn unpublish(&self, content_type: &ContentType) -> Call<ContentType> {
        let request = self.client().build_unpublish(content_type);
        self.session.call(request, CmaClient::parse_resource::<ContentType>)
    }

    pub fn fetch_one(&self, space_id: &str, content_type_id: &str) -> Call<ContentType> {
        let request = self.client().build_fetch_one::<ContentType>(space_id, content_type_id);
        self.session.call(Ok(request), CmaClient::parse_resource::<ContentType>)
    }

    pub fn fetch_all(&self, space_id: &str) -> Call<CmaArray<ContentType>> {
        self.fetch_all_with_query(space_id, std::iter::empty::<(String, String)>())
    }

    pub fn fetch_all_with_query<I, K, V>(&self, space_id: &str, query: I) -> Call<CmaArray<ContentType>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let request = self.client().build_fetch_all::<ContentType, _, _, _>(space_id, query);
        self.session.call(Ok(request), CmaClient::parse_array::<ContentType>)
    }
}
