//! JSON dataset files
//!
//! A dataset file is a single JSON document:
//!
//! ```text
//! {
//!   "regions":      [ { "name": "Regions/sample/cell", "spots": [1, 2] } ],
//!   "spots":        [ { "spot_id": 1, "x": 10.0, "y": 20.0, "z": 0.0, "raster": 0 } ],
//!   "index_images": [ { "raster": 0, "transformation": [[..], [..], [..], [..]], "spot_ids": [1, 2] } ],
//!   "labels":       [ { "id": 1, "name": "segments", "spot_labels": { "1": 1 } } ]
//! }
//! ```
//!
//! [`JsonDataset`] serves the document as a [`DatasetSource`] and appends
//! labels to it as a [`LabelSink`]. Writes replace the file atomically.
//! [`DatasetSession`] scopes access to one file for the duration of a run.

use crate::dataset::{DatasetSource, LabelId, LabelSink};
use crate::error::{IoError, IoResult};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use spotseg_core::{IndexImage, LabelAssignment, RasterId, Region, Spot, SpotId, Transform};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Maximum input size in bytes to prevent unbounded memory growth.
const MAX_INPUT_SIZE: u64 = 1_000_000_000;

/// A region record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    pub name: String,
    #[serde(default)]
    pub spots: Vec<SpotId>,
}

/// A spot record in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotRecord {
    pub spot_id: SpotId,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    pub raster: RasterId,
}

/// An index image record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexImageRecord {
    pub raster: RasterId,
    pub transformation: [[f64; 4]; 4],
    #[serde(default)]
    pub spot_ids: Vec<SpotId>,
}

/// A persisted label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelRecord {
    pub id: LabelId,
    pub name: String,
    pub spot_labels: BTreeMap<SpotId, u32>,
}

/// The whole dataset document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetDocument {
    #[serde(default)]
    pub regions: Vec<RegionRecord>,
    #[serde(default)]
    pub spots: Vec<SpotRecord>,
    #[serde(default)]
    pub index_images: Vec<IndexImageRecord>,
    #[serde(default)]
    pub labels: Vec<LabelRecord>,
}

impl DatasetDocument {
    /// Read a document from a reader.
    pub fn read_from_reader(reader: &mut impl Read) -> IoResult<Self> {
        let mut buf = Vec::new();
        reader.take(MAX_INPUT_SIZE).read_to_end(&mut buf)?;
        Self::read_from_bytes(&buf)
    }

    /// Read a document from bytes.
    pub fn read_from_bytes(data: &[u8]) -> IoResult<Self> {
        let document: DatasetDocument = serde_json::from_slice(data)?;
        document.validate()?;
        Ok(document)
    }

    /// Write a document to a writer.
    pub fn write_to_writer(&self, writer: &mut impl Write) -> IoResult<()> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    /// Write a document to bytes.
    pub fn write_to_bytes(&self) -> IoResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to_writer(&mut buf)?;
        Ok(buf)
    }

    fn validate(&self) -> IoResult<()> {
        let mut seen = HashSet::with_capacity(self.spots.len());
        for spot in &self.spots {
            if !seen.insert(spot.spot_id) {
                return Err(IoError::InvalidData(format!(
                    "spot {} listed twice",
                    spot.spot_id
                )));
            }
        }
        let mut names = HashSet::with_capacity(self.labels.len());
        for label in &self.labels {
            if !names.insert(label.name.as_str()) {
                return Err(IoError::DuplicateLabel(label.name.clone()));
            }
        }
        Ok(())
    }
}

/// A dataset backed by one JSON document
#[derive(Debug, Clone)]
pub struct JsonDataset {
    path: Option<PathBuf>,
    document: DatasetDocument,
}

impl JsonDataset {
    /// Load a dataset file.
    pub fn read_from_file(path: impl AsRef<Path>) -> IoResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let document = DatasetDocument::read_from_reader(&mut BufReader::new(file))?;
        debug!(
            "loaded {}: {} regions, {} spots, {} index images, {} labels",
            path.display(),
            document.regions.len(),
            document.spots.len(),
            document.index_images.len(),
            document.labels.len()
        );
        Ok(Self {
            path: Some(path.to_path_buf()),
            document,
        })
    }

    /// An in-memory dataset; written labels are kept but never saved.
    pub fn from_document(document: DatasetDocument) -> IoResult<Self> {
        document.validate()?;
        Ok(Self {
            path: None,
            document,
        })
    }

    /// Backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The underlying document
    pub fn document(&self) -> &DatasetDocument {
        &self.document
    }

    /// Look up a stored label by name
    pub fn label(&self, name: &str) -> Option<&LabelRecord> {
        self.document.labels.iter().find(|l| l.name == name)
    }

    /// Write the document back to its file, replacing it atomically.
    pub fn save(&self) -> IoResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut tmp = NamedTempFile::new_in(&parent)?;
        self.document.write_to_writer(&mut tmp)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| IoError::Io(e.error))?;
        debug!("saved {}", path.display());
        Ok(())
    }

    fn find_region(&self, region_name: &str) -> IoResult<&RegionRecord> {
        let regions = &self.document.regions;
        if let Some(exact) = regions.iter().find(|r| r.name == region_name) {
            return Ok(exact);
        }
        let mut candidates = regions
            .iter()
            .filter(|r| Region::new(r.name.as_str(), Vec::new()).matches(region_name));
        match (candidates.next(), candidates.next()) {
            (Some(found), None) => Ok(found),
            (None, _) => Err(IoError::RegionNotFound(region_name.to_string())),
            (Some(_), Some(_)) => Err(IoError::InvalidData(format!(
                "region name '{region_name}' is ambiguous"
            ))),
        }
    }
}

impl DatasetSource for JsonDataset {
    fn regions(&self) -> IoResult<Vec<Region>> {
        Ok(self
            .document
            .regions
            .iter()
            .map(|r| Region::new(r.name.as_str(), r.spots.clone()))
            .collect())
    }

    fn region_spots(&self, region_name: &str) -> IoResult<Vec<Spot>> {
        let region = self.find_region(region_name)?;
        let by_id: HashMap<SpotId, &SpotRecord> = self
            .document
            .spots
            .iter()
            .map(|s| (s.spot_id, s))
            .collect();

        region
            .spots
            .iter()
            .map(|id| {
                let record = by_id.get(id).ok_or_else(|| {
                    IoError::InvalidData(format!(
                        "region '{}' lists spot {id} which has no record",
                        region.name
                    ))
                })?;
                Ok(Spot {
                    spot_id: record.spot_id,
                    x: record.x,
                    y: record.y,
                    z: record.z,
                    raster: record.raster,
                })
            })
            .collect()
    }

    fn index_images(&self, region_name: &str) -> IoResult<Vec<IndexImage>> {
        let region = self.find_region(region_name)?;
        let members: HashSet<SpotId> = region.spots.iter().copied().collect();
        Ok(self
            .document
            .index_images
            .iter()
            .filter(|img| img.spot_ids.iter().any(|id| members.contains(id)))
            .map(|img| {
                IndexImage::new(
                    img.raster,
                    Transform::from_rows(img.transformation),
                    img.spot_ids.clone(),
                )
            })
            .collect())
    }
}

impl LabelSink for JsonDataset {
    fn write_label(&mut self, name: &str, assignment: &LabelAssignment) -> IoResult<LabelId> {
        if self.label(name).is_some() {
            return Err(IoError::DuplicateLabel(name.to_string()));
        }
        let id = self
            .document
            .labels
            .iter()
            .map(|l| l.id)
            .max()
            .unwrap_or(0)
            + 1;
        self.document.labels.push(LabelRecord {
            id,
            name: name.to_string(),
            spot_labels: assignment.clone(),
        });
        if let Err(e) = self.save() {
            self.document.labels.pop();
            return Err(e);
        }
        info!("wrote label '{name}' (id {id}) with {} spots", assignment.len());
        Ok(id)
    }
}

/// Scoped access to a dataset file
///
/// Opened once per run and passed explicitly to the stages that need it.
#[derive(Debug)]
pub struct DatasetSession {
    dataset: Option<JsonDataset>,
}

impl DatasetSession {
    /// Open the dataset file at `path`.
    pub fn open(path: impl AsRef<Path>) -> IoResult<Self> {
        let dataset = JsonDataset::read_from_file(path)?;
        Ok(Self {
            dataset: Some(dataset),
        })
    }

    /// The open dataset.
    pub fn dataset(&self) -> IoResult<&JsonDataset> {
        self.dataset.as_ref().ok_or(IoError::SessionClosed)
    }

    /// The open dataset, mutably.
    pub fn dataset_mut(&mut self) -> IoResult<&mut JsonDataset> {
        self.dataset.as_mut().ok_or(IoError::SessionClosed)
    }

    /// Whether the session has been closed
    pub fn is_closed(&self) -> bool {
        self.dataset.is_none()
    }

    /// Release the dataset.
    ///
    /// Labels are persisted as they are written, so closing never writes.
    pub fn close(&mut self) -> IoResult<()> {
        let dataset = self.dataset.take().ok_or(IoError::SessionClosed)?;
        if let Some(path) = dataset.path() {
            debug!("closed {}", path.display());
        }
        Ok(())
    }
}

impl Drop for DatasetSession {
    fn drop(&mut self) {
        if let Some(dataset) = self.dataset.take()
            && let Some(path) = dataset.path()
        {
            debug!("released {}", path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DOC: &str = r#"{
        "regions": [
            { "name": "Regions", "spots": [1, 2, 3] },
            { "name": "Regions/slide/cell", "spots": [1, 2] }
        ],
        "spots": [
            { "spot_id": 1, "x": 0.0, "y": 0.0, "raster": 0 },
            { "spot_id": 2, "x": 20.0, "y": 0.0, "raster": 0 },
            { "spot_id": 3, "x": 500.0, "y": 500.0, "z": 1.0, "raster": 1 }
        ],
        "index_images": [
            { "raster": 0, "transformation": [[20,0,0,0],[0,20,0,0],[0,0,1,0],[0,0,0,1]], "spot_ids": [1, 2] },
            { "raster": 1, "transformation": [[20,0,0,0],[0,20,0,0],[0,0,1,0],[0,0,0,1]], "spot_ids": [3] }
        ]
    }"#;

    fn write_doc(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("dataset.json");
        std::fs::write(&path, DOC).unwrap();
        path
    }

    #[test]
    fn test_region_spots_by_short_name() {
        let ds = JsonDataset::from_document(DatasetDocument::read_from_bytes(DOC.as_bytes()).unwrap())
            .unwrap();
        let spots = ds.region_spots("cell").unwrap();
        assert_eq!(spots.len(), 2);
        assert_eq!(spots[1], Spot::new(2, 20.0, 0.0, 0));

        let all = ds.region_spots("Regions").unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].z, 1.0);

        assert!(matches!(
            ds.region_spots("nope"),
            Err(IoError::RegionNotFound(_))
        ));
    }

    #[test]
    fn test_index_images_filtered_by_region() {
        let ds = JsonDataset::from_document(DatasetDocument::read_from_bytes(DOC.as_bytes()).unwrap())
            .unwrap();
        let images = ds.index_images("Regions/slide/cell").unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].raster, 0);
        assert_eq!(ds.index_images("Regions").unwrap().len(), 2);
    }

    #[test]
    fn test_write_label_persists() {
        let dir = TempDir::new().unwrap();
        let path = write_doc(&dir);

        let mut ds = JsonDataset::read_from_file(&path).unwrap();
        let assignment: LabelAssignment = [(1, 1), (2, 1)].into_iter().collect();
        assert_eq!(ds.write_label("segments", &assignment).unwrap(), 1);
        assert_eq!(ds.write_label("more", &assignment).unwrap(), 2);

        let reloaded = JsonDataset::read_from_file(&path).unwrap();
        let label = reloaded.label("segments").unwrap();
        assert_eq!(label.id, 1);
        assert_eq!(label.spot_labels, assignment);
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let mut ds = JsonDataset::from_document(DatasetDocument::default()).unwrap();
        let assignment = LabelAssignment::new();
        ds.write_label("a", &assignment).unwrap();
        assert!(matches!(
            ds.write_label("a", &assignment),
            Err(IoError::DuplicateLabel(_))
        ));
        assert_eq!(ds.document().labels.len(), 1);
    }

    #[test]
    fn test_duplicate_spot_record_rejected() {
        let doc = r#"{ "spots": [
            { "spot_id": 1, "x": 0.0, "y": 0.0, "raster": 0 },
            { "spot_id": 1, "x": 1.0, "y": 0.0, "raster": 0 }
        ] }"#;
        assert!(matches!(
            DatasetDocument::read_from_bytes(doc.as_bytes()),
            Err(IoError::InvalidData(_))
        ));
    }

    #[test]
    fn test_session_lifecycle() {
        let dir = TempDir::new().unwrap();
        let path = write_doc(&dir);

        let mut session = DatasetSession::open(&path).unwrap();
        assert_eq!(session.dataset().unwrap().regions().unwrap().len(), 2);
        session.close().unwrap();
        assert!(session.is_closed());
        assert!(matches!(session.dataset(), Err(IoError::SessionClosed)));
        assert!(session.close().is_err());
    }

    #[test]
    fn test_open_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            DatasetSession::open(dir.path().join("missing.json")),
            Err(IoError::Io(_))
        ));
    }
}
