use crate::call::Call;
use crate::client::CmaClient;
use crate::model::Appearance;
use crate::session::CmaSession;

/// Editor appearance operations.
#[derive(Debug, Clone, Copy)]
pub struct Appearances<'a> {
    session: &'a CmaSession,
}

impl<'a> Appearances<'a> {
    pub(crate) fn new(session: &'a CmaSession) -> Self {
        Self { session }
    }

    pub fn fetch_one(&self, space_id: &str, content_type_id: &str) -> Call<Appearance> {
        let request = self.session.client().build_fetch_appearance(space_id, content_type_id);
        self.session.call(Ok(request), CmaClient::parse_resource::<Appearance>)
    }

    pub fn update(&self, appearance: &Appearance) -> Call<Appearance> {
        let request = self.session.client().build_update_appearance(appearance);
        self.session.call(request, CmaClient::parse_resource::<Appearance>)
    }
}
