use crate::error::Result;
use crate::models::{canonical_name, Coordinates, Location};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Persisted mapping of place names to coordinates.
///
/// Names are keyed by their canonical capitalized form, so lookups are
/// case-insensitive. The backing file is a JSON object of
/// `name -> {"lat": .., "lon": ..}` and is rewritten in full on every save.
pub struct LocationDirectory {
    entries: BTreeMap<String, Coordinates>,
    path: Option<PathBuf>,
}

impl LocationDirectory {
    /// Load the directory from `path`. A missing file yields an empty directory.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let raw: BTreeMap<String, Coordinates> = serde_json::from_str(&content)?;
            load_entries(raw)
        } else {
            debug!("No location file at {:?}, starting empty", path);
            BTreeMap::new()
        };

        info!("Loaded {} saved location(s)", entries.len());

        Ok(Self {
            entries,
            path: Some(path),
        })
    }

    /// Directory that is never written to disk
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self {
            entries: BTreeMap::new(),
            path: None,
        }
    }

    pub fn get(&self, name: &str) -> Option<Location> {
        let key = canonical_name(name);
        self.entries.get(&key).map(|coordinates| Location {
            name: key.clone(),
            coordinates: *coordinates,
        })
    }

    /// Validate and store a location, then persist the whole directory.
    ///
    /// On validation or write failure the in-memory directory is left as it was.
    pub fn save(&mut self, name: &str, latitude: f64, longitude: f64) -> Result<Location> {
        let coordinates = Coordinates::new(latitude, longitude)?;
        let location = Location::new(name, coordinates);

        let previous = self.entries.insert(location.name.clone(), coordinates);
        if let Err(e) = self.persist() {
            match previous {
                Some(old) => self.entries.insert(location.name.clone(), old),
                None => self.entries.remove(&location.name),
            };
            return Err(e);
        }

        info!("Saved location {} at ({})", location.name, coordinates);
        Ok(location)
    }

    /// All saved locations in name order
    pub fn all(&self) -> Vec<Location> {
        self.entries
            .iter()
            .map(|(name, coordinates)| Location {
                name: name.clone(),
                coordinates: *coordinates,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Canonicalize and validate entries read from disk.
///
/// Out-of-range coordinates are skipped. When several stored names share a
/// canonical key the first in sorted key order is kept.
fn load_entries(raw: BTreeMap<String, Coordinates>) -> BTreeMap<String, Coordinates> {
    let mut entries = BTreeMap::new();

    for (stored_name, coords) in raw {
        let coordinates = match Coordinates::new(coords.latitude, coords.longitude) {
            Ok(c) => c,
            Err(e) => {
                warn!("Skipping saved location {:?}: {}", stored_name, e);
                continue;
            }
        };

        let name = canonical_name(&stored_name);
        if name.is_empty() {
            warn!("Skipping saved location with empty name");
            continue;
        }
        if entries.contains_key(&name) {
            warn!(
                "Saved location {:?} duplicates {} and was ignored",
                stored_name, name
            );
            continue;
        }
        entries.insert(name, coordinates);
    }

    entries
}
