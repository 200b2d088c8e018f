/*
    Debris Orbits, Keplerian orbit quantities and orbital debris retrieval
    Copyright (C) 2023 Christopher Rabotin <christopher.rabotin@gmail.com>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use crate::cosmic::AstroError;
use crate::io::{ConfigError, ConfigRepr, InvalidConfigSnafu};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_derive::{Deserialize, Serialize};
use snafu::prelude::*;
use std::fmt;
use std::time::Duration as StdDuration;
use typed_builder::TypedBuilder;

mod gp;
pub use self::gp::*;

/// Environment variable holding the Space-Track identity (user name)
pub const USERNAME_VAR: &str = "SPACETRACK_USERNAME";
/// Environment variable holding the Space-Track password
pub const PASSWORD_VAR: &str = "SPACETRACK_PASSWORD";
/// Default Space-Track endpoint
pub const SPACETRACK_URL: &str = "https://www.space-track.org";

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TrackingError {
    #[snafu(display("HTTP request to Space-Track failed: {source}"))]
    Http { source: reqwest::Error },
    #[snafu(display("Space-Track authentication failed ({status}): {detail}"))]
    Authentication { status: u16, detail: String },
    #[snafu(display("could not decode Space-Track response: {source}"))]
    Decode { source: serde_json::Error },
    #[snafu(display("Space-Track credentials missing: set the {var} environment variable"))]
    Credentials { var: &'static str },
    #[snafu(display("element set is missing {field}"))]
    MissingElement { field: &'static str },
    #[snafu(display("could not parse epoch `{epoch}`: {detail}"))]
    EpochParse { epoch: String, detail: String },
    #[snafu(display("invalid Space-Track configuration: {source}"))]
    TrackingConfig { source: ConfigError },
    #[snafu(display("element set is not a valid orbit: {source}"))]
    TrackingAstro { source: AstroError },
}

fn default_base_url() -> String {
    SPACETRACK_URL.to_string()
}

fn default_timeout_s() -> f64 {
    30.0
}

/// Connection settings for Space-Track.
#[derive(Clone, Serialize, Deserialize, TypedBuilder)]
#[builder(doc)]
pub struct SpaceTrackCfg {
    #[builder(setter(into))]
    pub identity: String,
    #[builder(setter(into))]
    pub password: String,
    #[serde(default = "default_base_url")]
    #[builder(default = default_base_url(), setter(into))]
    pub base_url: String,
    /// Timeout of each request, in seconds
    #[serde(default = "default_timeout_s")]
    #[builder(default = default_timeout_s())]
    pub timeout_s: f64,
}

impl SpaceTrackCfg {
    /// Reads the credentials from the `SPACETRACK_USERNAME` and `SPACETRACK_PASSWORD` environment variables.
    pub fn from_env() -> Result<Self, TrackingError> {
        let identity = std::env::var(USERNAME_VAR).map_err(|_| TrackingError::Credentials {
            var: USERNAME_VAR,
        })?;
        let password = std::env::var(PASSWORD_VAR).map_err(|_| TrackingError::Credentials {
            var: PASSWORD_VAR,
        })?;
        Ok(Self::builder().identity(identity).password(password).build())
    }

    /// Checks that the credentials are set and that the timeout is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure!(
            !self.identity.trim().is_empty() && !self.password.is_empty(),
            InvalidConfigSnafu {
                msg: "Space-Track identity and password must not be empty"
            }
        );
        self.timeout()?;
        ensure!(
            self.base_url.starts_with("http://") || self.base_url.starts_with("https://"),
            InvalidConfigSnafu {
                msg: format!("base URL `{}` is not an HTTP URL", self.base_url)
            }
        );
        Ok(())
    }

    /// Returns the request timeout, which must be a positive duration that fits in a `std::time::Duration`.
    pub fn timeout(&self) -> Result<StdDuration, ConfigError> {
        ensure!(
            self.timeout_s > 0.0,
            InvalidConfigSnafu {
                msg: format!("timeout must be a positive number of seconds, got {}", self.timeout_s)
            }
        );
        StdDuration::try_from_secs_f64(self.timeout_s).map_err(|e| {
            InvalidConfigSnafu {
                msg: format!("timeout of {} s is not usable: {e}", self.timeout_s),
            }
            .build()
        })
    }
}

impl fmt::Debug for SpaceTrackCfg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpaceTrackCfg")
            .field("identity", &self.identity)
            .field("password", &"********")
            .field("base_url", &self.base_url)
            .field("timeout_s", &self.timeout_s)
            .finish()
    }
}

impl ConfigRepr for SpaceTrackCfg {}

/// A query against one of the Space-Track request classes (e.g. `gp`).
///
/// Predicates are kept in insertion order since Space-Track applies them in the order of the URL.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GpQuery {
    pub predicates: Vec<(String, String)>,
    pub orderby: Option<String>,
    pub limit: Option<usize>,
    pub format: String,
}

impl Default for GpQuery {
    fn default() -> Self {
        Self {
            predicates: Vec::new(),
            orderby: None,
            limit: None,
            format: "json".to_string(),
        }
    }
}

impl GpQuery {
    /// Debris that have not decayed yet
    pub fn debris(limit: usize) -> Self {
        Self::default()
            .with_predicate("object_type", "DEBRIS")
            .with_predicate("decay_date", "null-val")
            .with_limit(limit)
    }

    /// Element set of a single catalog object
    pub fn norad_cat_id(norad_cat_id: u32) -> Self {
        Self::default().with_predicate("norad_cat_id", norad_cat_id.to_string())
    }

    /// Adds a predicate, the field name is upper cased like Space-Track field names.
    pub fn with_predicate(mut self, field: &str, value: impl Into<String>) -> Self {
        self.predicates.push((field.to_uppercase(), value.into()));
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_orderby(mut self, orderby: impl Into<String>) -> Self {
        self.orderby = Some(orderby.into());
        self
    }

    /// Builds the path of this query for the provided request class.
    pub fn to_path(&self, class: &str) -> String {
        let mut path = format!("/basicspacedata/query/class/{class}");
        for (field, value) in &self.predicates {
            path.push_str(&format!("/{field}/{value}"));
        }
        if let Some(orderby) = &self.orderby {
            path.push_str(&format!("/orderby/{orderby}"));
        }
        if let Some(limit) = self.limit {
            path.push_str(&format!("/limit/{limit}"));
        }
        path.push_str(&format!("/format/{}", self.format));
        path
    }
}

/// Blocking Space-Track client. The session cookie is kept by the underlying HTTP client after login.
pub struct SpaceTrackClient {
    cfg: SpaceTrackCfg,
    client: Client,
    authenticated: bool,
}

impl SpaceTrackClient {
    pub fn new(cfg: SpaceTrackCfg) -> Result<Self, TrackingError> {
        cfg.validate().context(TrackingConfigSnafu)?;
        let timeout = cfg.timeout().context(TrackingConfigSnafu)?;

        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context(HttpSnafu)?;

        Ok(Self {
            cfg,
            client,
            authenticated: false,
        })
    }

    /// Initializes a client from the credentials in the environment.
    pub fn from_env() -> Result<Self, TrackingError> {
        Self::new(SpaceTrackCfg::from_env()?)
    }

    pub fn cfg(&self) -> &SpaceTrackCfg {
        &self.cfg
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.cfg.base_url.trim_end_matches('/'))
    }

    /// Logs in to Space-Track, storing the session cookie.
    pub fn login(&mut self) -> Result<(), TrackingError> {
        info!("logging in to {} as {}", self.cfg.base_url, self.cfg.identity);
        let resp = self
            .client
            .post(self.url("/ajaxauth/login"))
            .form(&[
                ("identity", self.cfg.identity.as_str()),
                ("password", self.cfg.password.as_str()),
            ])
            .send()
            .context(HttpSnafu)?;

        let status = resp.status();
        let body = resp.text().context(HttpSnafu)?;
        if !status.is_success() || body.contains(r#""Login":"Failed""#) {
            self.authenticated = false;
            return AuthenticationSnafu {
                status: status.as_u16(),
                detail: body,
            }
            .fail();
        }

        self.authenticated = true;
        Ok(())
    }

    /// Ends the Space-Track session.
    pub fn logout(&mut self) -> Result<(), TrackingError> {
        if self.authenticated {
            self.client
                .get(self.url("/ajaxauth/logout"))
                .send()
                .context(HttpSnafu)?;
            self.authenticated = false;
        }
        Ok(())
    }

    /// Runs the query against the provided request class and returns the raw body. Logs in first if needed.
    pub fn generic_request(
        &mut self,
        class: &str,
        query: &GpQuery,
    ) -> Result<String, TrackingError> {
        if !self.authenticated {
            self.login()?;
        }

        let url = self.url(&query.to_path(class));
        debug!("GET {url}");
        let resp = self.client.get(&url).send().context(HttpSnafu)?;

        if resp.status() == StatusCode::UNAUTHORIZED {
            self.authenticated = false;
            return AuthenticationSnafu {
                status: resp.status().as_u16(),
                detail: "session expired or not logged in".to_string(),
            }
            .fail();
        }

        resp.error_for_status()
            .context(HttpSnafu)?
            .text()
            .context(HttpSnafu)
    }

    /// Fetches the GP element sets matching the query.
    pub fn gp(&mut self, query: &GpQuery) -> Result<Vec<GpRecord>, TrackingError> {
        let body = self.generic_request("gp", query)?;
        let records = parse_gp_records(&body)?;
        info!("retrieved {} GP records", records.len());
        Ok(records)
    }

    /// Fetches up to `limit` element sets of debris which have not decayed.
    pub fn debris(&mut self, limit: usize) -> Result<Vec<GpRecord>, TrackingError> {
        self.gp(&GpQuery::debris(limit))
    }
}
