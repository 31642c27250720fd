// Plugin endpoints
//
// Device packs are the vendor/product plugins a device is bound to. The
// listing endpoint is not domain-scoped in its path; the domain travels
// as a query parameter instead.

use tracing::debug;

use crate::client::SecurityManagerClient;
use crate::error::Error;
use crate::models::{DevicePack, Page};

impl SecurityManagerClient {
    /// List installed device packs, sorted by vendor then device name.
    ///
    /// `GET /plugin/list/DEVICE_PACK.json?domainId={d}&page={p}&pageSize={s}&search=&showHidden=true&sort=vendor&sort=deviceName`
    pub async fn list_device_packs(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<Page<DevicePack>, Error> {
        let mut url = self.api_url("plugin/list/DEVICE_PACK.json")?;
        url.query_pairs_mut()
            .append_pair("domainId", &self.domain_id().to_string())
            .append_pair("page", &page.to_string())
            .append_pair("pageSize", &page_size.to_string())
            .append_pair("search", "")
            .append_pair("showHidden", "true")
            .append_pair("sort", "vendor")
            .append_pair("sort", "deviceName");
        debug!(page, page_size, "listing device packs");
        self.get(url).await
    }
}
