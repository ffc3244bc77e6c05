use crate::call::Call;
use crate::client::CmaClient;
use crate::model::{CmaArray, Space};
use crate::session::CmaSession;

/// Space operations.
#[derive(Debug, Clone, Copy)]
pub struct Spaces<'a> {
    session: &'a CmaSession,
}

impl<'a> Spaces<'a> {
    pub(crate) fn new(session: &'a CmaSession) -> Self {
        Self { session }
    }

    pub fn fetch_all(&self) -> Call<CmaArray<Space>> {
        let request = self.session.client().build_fetch_spaces();
        self.session.call(Ok(request), CmaClient::parse_array::<Space>)
    }

    pub fn fetch_one(&self, space_id: &str) -> Call<Space> {
        let request = self.session.client().build_fetch_space(space_id);
        self.session.call(Ok(request), CmaClient::parse_resource::<Space>)
    }

    /// Create a space, optionally inside a specific organization.
    pub fn create(&self, space: &Space, organization_id: Option<&str>) -> Call<Space> {
        let request = self.session.client().build_create_space(space, organization_id);
        self.session.call(request, CmaClient::parse_resource::<Space>)
    }

    pub fn delete(&self, space_id: &str) -> Call<()> {
        let request = self.session.client().build_delete_space(space_id);
        self.session.call(Ok(request), CmaClient::parse_empty)
    }
}
