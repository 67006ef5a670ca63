//! Coordinate Reference System pass-through
//!
//! The drainage tools never reproject anything. A CRS is carried from the
//! input flow graph to every output grid so downstream writers can tag
//! their files.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coordinate Reference System attached to a grid layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CRS {
    /// WKT representation, as handed over by the raster reader
    #[serde(default)]
    wkt: Option<String>,
    /// EPSG code if known
    #[serde(default)]
    epsg: Option<u32>,
}

impl CRS {
    /// Create a CRS from an EPSG code
    pub fn from_epsg(code: u32) -> Self {
        Self {
            wkt: None,
            epsg: Some(code),
        }
    }

    /// Create a CRS from a WKT string
    pub fn from_wkt(wkt: impl Into<String>) -> Self {
        Self {
            wkt: Some(wkt.into()),
            epsg: None,
        }
    }

    /// Get EPSG code if known
    pub fn epsg(&self) -> Option<u32> {
        self.epsg
    }

    /// Get WKT representation
    pub fn wkt(&self) -> Option<&str> {
        self.wkt.as_deref()
    }

    /// Short identifier, `EPSG:<code>` when available
    pub fn identifier(&self) -> String {
        if let Some(code) = self.epsg {
            return format!("EPSG:{}", code);
        }
        if let Some(wkt) = &self.wkt {
            let end = wkt
                .char_indices()
                .nth(50)
                .map(|(i, _)| i)
                .unwrap_or(wkt.len());
            return format!("WKT:{}", &wkt[..end]);
        }
        "Unknown".to_string()
    }
}

impl fmt::Display for CRS {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crs_identifier() {
        assert_eq!(CRS::from_epsg(25830).identifier(), "EPSG:25830");
        assert!(CRS::from_wkt("PROJCS[\"ETRS89 / UTM zone 30N\"]")
            .identifier()
            .starts_with("WKT:PROJCS"));
    }

    #[test]
    fn test_crs_deserialize_partial() {
        let crs: CRS = serde_json::from_str(r#"{"epsg": 32630}"#).unwrap();
        assert_eq!(crs.epsg(), Some(32630));
        assert_eq!(crs.wkt(), None);
    }
}
