// Device search endpoint

use tracing::debug;

use crate::client::LmClient;
use crate::error::Error;
use crate::models::{DeviceFilter, DeviceItem, DeviceList};

impl LmClient {
    /// Search devices matching a filter.
    ///
    /// `GET /device/devices?filter=<expr>&size=<page_size>`
    ///
    /// Returns the first page only, in portal order.
    pub async fn search_devices(
        &self,
        filter: &DeviceFilter,
        page_size: u32,
    ) -> Result<Vec<DeviceItem>, Error> {
        debug!(%filter, page_size, "searching devices");
        let params = [("filter", filter.to_string()), ("size", page_size.to_string())];
        let list: DeviceList = self.get_with_params("device/devices", &params).await?;
        debug!(
            returned = list.items.len(),
            total = ?list.total,
            "device search complete"
        );
        Ok(list.items)
    }
}
