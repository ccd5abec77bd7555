//! Runtime configuration: data file locations and listen address.
//!
//! Every value can come from a CLI flag or an environment variable
//! (a `.env` file is loaded by the binary before parsing).

use clap::Args;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PROVIDER_LIST_PATH: &str = "output/bdc_us_provider_list.csv";
pub const DEFAULT_ZIP_TO_PROVIDERS_PATH: &str = "output/zip_to_providers_unique.csv";
pub const DEFAULT_PROVIDERS_BY_COUNTY_PATH: &str = "output/providers_by_county.csv";
pub const DEFAULT_COUNTY_ZIP_PATH: &str = "output/county_zip.csv";
pub const DEFAULT_PORT: u16 = 8000;

/// Locations of the four reference tables.
#[derive(Debug, Clone, Args)]
pub struct DataPaths {
    /// Provider directory (provider_id + a name column)
    #[arg(long, env = "PROVIDER_LIST_PATH", default_value = DEFAULT_PROVIDER_LIST_PATH)]
    pub provider_list: PathBuf,

    /// Pre-joined ZIP to provider file, tried first
    #[arg(long, env = "ZIP_TO_PROVIDERS_PATH", default_value = DEFAULT_ZIP_TO_PROVIDERS_PATH)]
    pub zip_to_providers: PathBuf,

    /// Providers by county, joined with the crosswalk when the direct file is unusable
    #[arg(long, env = "PROVIDERS_BY_COUNTY_PATH", default_value = DEFAULT_PROVIDERS_BY_COUNTY_PATH)]
    pub providers_by_county: PathBuf,

    /// County to ZIP crosswalk
    #[arg(long, env = "COUNTY_ZIP_PATH", default_value = DEFAULT_COUNTY_ZIP_PATH)]
    pub county_zip: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            provider_list: PathBuf::from(DEFAULT_PROVIDER_LIST_PATH),
            zip_to_providers: PathBuf::from(DEFAULT_ZIP_TO_PROVIDERS_PATH),
            providers_by_county: PathBuf::from(DEFAULT_PROVIDERS_BY_COUNTY_PATH),
            county_zip: PathBuf::from(DEFAULT_COUNTY_ZIP_PATH),
        }
    }
}

/// HTTP listen address.
#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
    /// Interface to bind
    #[arg(long, env = "ZIPFINDER_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}
