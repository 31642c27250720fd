// Device group endpoints
//
// Groups are only reachable through the SIQL search API. The query is
// `domain{id=N}`, URL-encoded by the query serializer.

use tracing::debug;

use crate::client::SecurityManagerClient;
use crate::error::Error;
use crate::models::{DeviceGroup, Page};

impl SecurityManagerClient {
    /// List device groups in the current domain, sorted by name.
    ///
    /// `GET /siql/devicegroup/paged-search?q=domain{id=d}&page={p}&pageSize={s}&sortdir=asc&sort=name`
    pub async fn list_device_groups(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<Page<DeviceGroup>, Error> {
        let mut url = self.api_url("siql/devicegroup/paged-search")?;
        url.query_pairs_mut()
            .append_pair("q", &format!("domain{{id={}}}", self.domain_id()))
            .append_pair("page", &page.to_string())
            .append_pair("pageSize", &page_size.to_string())
            .append_pair("sortdir", "asc")
            .append_pair("sort", "name");
        debug!(page, page_size, "listing device groups");
        self.get(url).await
    }
}
