// Contract endpoints
//
// Contract listing and the devices attached to a contract.

use tracing::debug;

use crate::client::SigfoxClient;
use crate::error::Error;
use crate::models::{Contract, Device, Page};
use crate::paginate::PageMode;

impl SigfoxClient {
    /// List contracts visible to the API user.
    ///
    /// `GET /contract-infos/`
    pub async fn get_contracts(&self, mode: PageMode) -> Result<Page<Contract>, Error> {
        let url = self.endpoint(&["contract-infos", ""])?;
        debug!(?mode, "listing contracts");
        self.get_paged(url, mode).await
    }

    /// List devices registered under a contract.
    ///
    /// `GET /contract-infos/{id}/devices`
    pub async fn get_devices_by_contract(
        &self,
        contract_id: &str,
        mode: PageMode,
    ) -> Result<Page<Device>, Error> {
        let url = self.endpoint(&["contract-infos", contract_id, "devices"])?;
        debug!(contract_id, ?mode, "listing contract devices");
        self.get_paged(url, mode).await
    }
}
