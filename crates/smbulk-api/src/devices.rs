// Device endpoints
//
// Devices are selected either through the domain device filter (by device
// pack) or through SIQL search (by device group). Updates always go through
// the domain-scoped device resource with the full record as body.

use tracing::debug;

use crate::client::SecurityManagerClient;
use crate::error::Error;
use crate::models::{Device, Page};

/// Which devices a listing or count applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceFilter {
    /// Devices bound to a device pack, by pack ID.
    DevicePack(String),
    /// Members of a device group, by group ID.
    DeviceGroup(String),
}

impl DeviceFilter {
    /// The filter key the platform uses for this selector.
    pub fn filter_key(&self) -> &'static str {
        match self {
            Self::DevicePack(_) => "devicepackids",
            Self::DeviceGroup(_) => "devicegroupids",
        }
    }

    /// The selected pack or group ID.
    pub fn id(&self) -> &str {
        match self {
            Self::DevicePack(id) | Self::DeviceGroup(id) => id,
        }
    }
}

impl SecurityManagerClient {
    /// Build the listing URL for a filter. `page` is omitted when `None`.
    fn device_listing_url(
        &self,
        filter: &DeviceFilter,
        page: Option<u32>,
        page_size: u32,
    ) -> Result<url::Url, Error> {
        match filter {
            DeviceFilter::DevicePack(id) => {
                let mut url = self.domain_url("device/filter")?;
                {
                    let mut query = url.query_pairs_mut();
                    if let Some(page) = page {
                        query.append_pair("page", &page.to_string());
                    }
                    query
                        .append_pair("pageSize", &page_size.to_string())
                        .append_pair("filter", &format!("{}={id}", filter.filter_key()));
                }
                Ok(url)
            }
            DeviceFilter::DeviceGroup(id) => {
                let mut url = self.api_url("siql/device/paged-search")?;
                url.query_pairs_mut()
                    .append_pair("q", &format!("devicegroup{{id={id}}}"))
                    .append_pair("page", &page.unwrap_or(0).to_string())
                    .append_pair("pageSize", &page_size.to_string());
                Ok(url)
            }
        }
    }

    /// Count devices matching a filter with a single-row request.
    ///
    /// - pack: `GET /domain/{d}/device/filter?pageSize=1&filter=devicepackids={id}`
    /// - group: `GET /siql/device/paged-search?q=devicegroup{id={id}}&page=0&pageSize=1`
    pub async fn count_devices(&self, filter: &DeviceFilter) -> Result<u64, Error> {
        let page = match filter {
            DeviceFilter::DevicePack(_) => None,
            DeviceFilter::DeviceGroup(_) => Some(0),
        };
        let url = self.device_listing_url(filter, page, 1)?;
        debug!(filter = filter.filter_key(), id = filter.id(), "counting devices");
        let page: Page<Device> = self.get(url).await?;
        Ok(page.total)
    }

    /// Fetch one page of devices matching a filter.
    ///
    /// Device-group results are a partial projection; use
    /// [`get_device`](Self::get_device) before updating them.
    pub async fn list_devices(
        &self,
        filter: &DeviceFilter,
        page: u32,
        page_size: u32,
    ) -> Result<Page<Device>, Error> {
        let url = self.device_listing_url(filter, Some(page), page_size)?;
        debug!(
            filter = filter.filter_key(),
            id = filter.id(),
            page,
            page_size,
            "listing devices"
        );
        self.get(url).await
    }

    /// Fetch the full device record.
    ///
    /// `GET /domain/{d}/device/{id}`
    pub async fn get_device(&self, id: i64) -> Result<Device, Error> {
        let url = self.domain_url(&format!("device/{id}"))?;
        self.get(url).await
    }

    /// Replace a device record without triggering a manual retrieval.
    ///
    /// `PUT /domain/{d}/device/{id}?manualRetrieval=false` with the full
    /// device JSON. Returns the 2xx status; any other status is an
    /// [`Error::Status`] carrying the response body.
    pub async fn update_device(&self, device: &Device) -> Result<reqwest::StatusCode, Error> {
        let mut url = self.domain_url(&format!("device/{}", device.id))?;
        url.query_pairs_mut().append_pair("manualRetrieval", "false");
        debug!(id = device.id, "updating device");
        self.put(url, device).await
    }
}
