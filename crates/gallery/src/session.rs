//! Gallery session
//!
//! Owns the image list and its layout and applies the mutation policy:
//!
//! - **Insert** keeps every existing tile where it is and first-fit places
//!   one new tile per image against the current occupancy. Repair runs only
//!   when the caller asks for it.
//! - **Shuffle / replace** throws the layout away, generates a fresh one for
//!   the whole item list and always repairs it.
//! - **Remove** drops the matching tiles. Whether the holes get repaired is
//!   decided by [`RemovalPolicy`].
//! - **Reported layouts** from the grid renderer replace the layout verbatim,
//!   with no validation and no repair.
//!
//! Every change is computed on a copy and committed only when it succeeds, so
//! a failed call leaves the session as it was.

use crate::{tile_size, GalleryPolicy, GallerySettings, GapFill, ImageMeta, RemovalPolicy, Result};
use bento_grid::{
    generate_layout, grid_stats, place_tile, repair_gaps_with_limit, GridConfig, GridStats, Layout,
    OccupancyMap, RepairOutcome, RepairStatus,
};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Summary of a repair pass that ran as part of a change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepairReport {
    pub residual_gaps: usize,
    pub expansions: u32,
    pub status: RepairStatus,
}

impl From<&RepairOutcome> for RepairReport {
    fn from(outcome: &RepairOutcome) -> Self {
        Self {
            residual_gaps: outcome.residual_gaps,
            expansions: outcome.expansions,
            status: outcome.status,
        }
    }
}

/// What a structural change did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutChange {
    /// Ids of images that gained a tile
    pub added: Vec<String>,
    /// Ids of images whose tile was dropped
    pub removed: Vec<String>,
    /// Present when a repair pass ran
    pub repair: Option<RepairReport>,
}

/// Image list plus its current bento layout
#[derive(Debug, Clone)]
pub struct Gallery {
    config: GridConfig,
    policy: GalleryPolicy,
    items: Vec<ImageMeta>,
    layout: Layout,
}

impl Gallery {
    /// Create an empty gallery. Fails if the grid configuration can never
    /// place a tile.
    pub fn new(config: GridConfig, policy: GalleryPolicy) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            policy,
            items: Vec::new(),
            layout: Layout::new(),
        })
    }

    /// Create an empty gallery from loaded settings
    pub fn from_settings(settings: GallerySettings) -> Result<Self> {
        Self::new(settings.grid, settings.policy)
    }

    /// Current configuration and policy, ready to be saved
    pub fn settings(&self) -> GallerySettings {
        GallerySettings {
            grid: self.config.clone(),
            policy: self.policy,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn policy(&self) -> &GalleryPolicy {
        &self.policy
    }

    pub fn set_policy(&mut self, policy: GalleryPolicy) {
        self.policy = policy;
    }

    pub fn items(&self) -> &[ImageMeta] {
        &self.items
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn stats(&self) -> GridStats {
        grid_stats(&self.layout, self.config.grid_width)
    }

    /// Add images without disturbing the existing arrangement.
    ///
    /// Images whose id is already in the gallery, or repeated within the
    /// batch, are skipped.
    pub fn insert<I, R>(
        &mut self,
        images: I,
        gap_fill: GapFill,
        rng: &mut R,
    ) -> Result<LayoutChange>
    where
        I: IntoIterator<Item = ImageMeta>,
        R: Rng + ?Sized,
    {
        let mut known: HashSet<String> = self.items.iter().map(|item| item.id.clone()).collect();
        known.extend(self.layout.iter().map(|tile| tile.id.clone()));

        let mut occupancy = OccupancyMap::from_layout(&self.layout, self.config.grid_width);
        let mut tiles = self.layout.tiles().to_vec();
        let mut items = self.items.clone();
        let mut added = Vec::new();

        for image in images {
            if !known.insert(image.id.clone()) {
                tracing::debug!(id = %image.id, "skipping image already in gallery");
                continue;
            }
            let (w, h) = tile_size(&image, self.policy.sizing, &self.config, rng);
            tiles.push(place_tile(&mut occupancy, image.id.as_str(), w, h, &self.config)?);
            added.push(image.id.clone());
            items.push(image);
        }

        let mut layout = Layout::from_tiles(tiles);
        let repair = match gap_fill {
            GapFill::Repair => {
                let outcome = self.repair_layout(&layout);
                let report = RepairReport::from(&outcome);
                layout = outcome.layout;
                Some(report)
            }
            GapFill::Leave => None,
        };

        self.items = items;
        self.layout = layout;
        tracing::info!(added = added.len(), total = self.items.len(), "images inserted");
        Ok(LayoutChange {
            added,
            removed: Vec::new(),
            repair,
        })
    }

    /// Shuffle the image order and lay everything out from scratch
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<LayoutChange> {
        let mut items = self.items.clone();
        items.shuffle(rng);
        let repair = self.regenerate(items, rng)?;
        tracing::info!(total = self.items.len(), "gallery shuffled");
        Ok(LayoutChange {
            added: Vec::new(),
            removed: Vec::new(),
            repair: Some(repair),
        })
    }

    /// Replace every image and lay the new set out from scratch, in the
    /// given order. Repeated ids keep their first occurrence.
    pub fn replace_all<I, R>(&mut self, images: I, rng: &mut R) -> Result<LayoutChange>
    where
        I: IntoIterator<Item = ImageMeta>,
        R: Rng + ?Sized,
    {
        let mut seen = HashSet::new();
        let items: Vec<ImageMeta> = images
            .into_iter()
            .filter(|image| seen.insert(image.id.clone()))
            .collect();

        let previous: Vec<String> = self.items.iter().map(|item| item.id.clone()).collect();
        let added = items
            .iter()
            .map(|item| item.id.clone())
            .filter(|id| !previous.contains(id))
            .collect();
        let removed = previous
            .into_iter()
            .filter(|id| !seen.contains(id))
            .collect();

        let repair = self.regenerate(items, rng)?;
        tracing::info!(total = self.items.len(), "gallery replaced");
        Ok(LayoutChange {
            added,
            removed,
            repair: Some(repair),
        })
    }

    fn regenerate<R: Rng + ?Sized>(
        &mut self,
        items: Vec<ImageMeta>,
        rng: &mut R,
    ) -> Result<RepairReport> {
        let ids: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();
        let generated = generate_layout(&ids, &self.config, rng)?;
        let outcome = self.repair_layout(&generated);
        let report = RepairReport::from(&outcome);

        self.items = items;
        self.layout = outcome.layout;
        Ok(report)
    }

    /// Drop the tiles and images with the given ids. Survivors keep their
    /// geometry unless the removal policy asks for a repair.
    pub fn remove<S: AsRef<str>>(&mut self, ids: &[S]) -> LayoutChange {
        let targets: HashSet<&str> = ids.iter().map(AsRef::as_ref).collect();
        let mut removed: Vec<String> = Vec::new();
        let known = self
            .items
            .iter()
            .map(|item| &item.id)
            .chain(self.layout.iter().map(|tile| &tile.id));
        for id in known {
            if targets.contains(id.as_str()) && !removed.contains(id) {
                removed.push(id.clone());
            }
        }

        self.items.retain(|item| !targets.contains(item.id.as_str()));
        let mut layout = self.layout.without(ids);

        let repair = match self.policy.removal {
            RemovalPolicy::Repair if !removed.is_empty() => {
                let outcome = self.repair_layout(&layout);
                let report = RepairReport::from(&outcome);
                layout = outcome.layout;
                Some(report)
            }
            _ => None,
        };
        self.layout = layout;

        tracing::info!(removed = removed.len(), total = self.items.len(), "images removed");
        LayoutChange {
            added: Vec::new(),
            removed,
            repair,
        }
    }

    /// Remove every image and reset the layout
    pub fn clear(&mut self) -> LayoutChange {
        let removed = self.items.drain(..).map(|item| item.id).collect();
        self.layout = Layout::new();
        tracing::info!("gallery cleared");
        LayoutChange {
            added: Vec::new(),
            removed,
            repair: None,
        }
    }

    /// Run the repair pass on the current layout
    pub fn repair(&mut self) -> RepairReport {
        let outcome = self.repair_layout(&self.layout);
        let report = RepairReport::from(&outcome);
        self.layout = outcome.layout;
        report
    }

    /// Accept a layout reported by the grid renderer after a drag or resize.
    ///
    /// The layout is taken as is. Overlaps or out-of-bounds tiles are the
    /// renderer's responsibility; call [`Layout::validate`] first if needed.
    pub fn apply_reported_layout(&mut self, layout: Layout) {
        tracing::debug!(tiles = layout.len(), "reported layout applied");
        self.layout = layout;
    }

    /// Parse the renderer's JSON item array and apply it
    pub fn apply_reported_json(&mut self, json: &str) -> Result<()> {
        let layout: Layout = serde_json::from_str(json)?;
        self.apply_reported_layout(layout);
        Ok(())
    }

    fn repair_layout(&self, layout: &Layout) -> RepairOutcome {
        repair_gaps_with_limit(layout, self.config.grid_width, self.config.max_repair_iterations)
    }
}
