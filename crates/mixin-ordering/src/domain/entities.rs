//! Core entities for mixin ordering
//!
//! A [`MixinSnapshot`] is the immutable input of one ordering run. Groups and
//! ordered groups are transient; [`CompositionOrder`] is the only durable output.

use super::errors::SnapshotError;
use super::value_objects::{BaseOperation, SnapshotFingerprint, UnitId};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Declared requirement of a mixin onto another capability
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRelevantDependency {
    /// Name of the required capability (interface or mixin)
    pub requirement: String,
    /// Mixin implementing the requirement, if it resolved to one
    pub implementer: Option<UnitId>,
}

/// Marks a mixin as overriding a shared base operation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRecord {
    pub base_operation: BaseOperation,
}

/// A mixin definition attached to the target type
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixinUnit {
    /// Identity inside the snapshot
    pub id: UnitId,
    /// Unique display name, used for ordering and diagnostics only
    pub name: String,
    /// Whether an alphabetic fallback may place this mixin among equal peers
    pub accepts_alphabetic_ordering: bool,
    /// Declared dependencies, in declaration order
    pub dependencies: Vec<OrderRelevantDependency>,
    /// Overridden base operations
    pub overrides: Vec<OverrideRecord>,
}

impl MixinUnit {
    /// Implementers of dependencies that resolved to a mixin.
    pub fn order_relevant_implementers(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.dependencies.iter().filter_map(|dep| dep.implementer)
    }

    /// Check whether this mixin declares a dependency resolving to `other`.
    pub fn depends_on(&self, other: UnitId) -> bool {
        self.order_relevant_implementers().any(|id| id == other)
    }
}

/// Immutable set of mixins attached to one target type.
///
/// Built through [`MixinSnapshot::builder`] or loaded from JSON. Owns the
/// override index that links every override record to the other records of
/// the same base operation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "SnapshotDocument", into = "SnapshotDocument")]
pub struct MixinSnapshot {
    target_type: String,
    units: Vec<MixinUnit>,
    overriders: BTreeMap<BaseOperation, Vec<UnitId>>,
}

impl MixinSnapshot {
    pub fn builder(target_type: impl Into<String>) -> SnapshotBuilder {
        SnapshotBuilder::new(target_type)
    }

    /// Load a snapshot from its JSON document form.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let document: SnapshotDocument = serde_json::from_str(json)?;
        Self::try_from(document)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(&SnapshotDocument::from(
            self.clone(),
        ))?)
    }

    pub fn target_type(&self) -> &str {
        &self.target_type
    }

    pub fn units(&self) -> &[MixinUnit] {
        &self.units
    }

    pub fn unit(&self, id: UnitId) -> Option<&MixinUnit> {
        self.units.get(id.0)
    }

    /// Display name of a unit, or `"<unknown>"` for a foreign id.
    pub fn name(&self, id: UnitId) -> &str {
        self.unit(id).map_or("<unknown>", |unit| unit.name.as_str())
    }

    pub fn ids(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.units.iter().map(|unit| unit.id)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// All mixins overriding `operation`, ascending by id.
    pub fn overriders_of(&self, operation: &BaseOperation) -> &[UnitId] {
        self.overriders
            .get(operation)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Other mixins overriding at least one base operation `id` overrides.
    pub fn shared_override_peers(&self, id: UnitId) -> Vec<UnitId> {
        let Some(unit) = self.unit(id) else {
            return Vec::new();
        };

        let mut peers: Vec<UnitId> = unit
            .overrides
            .iter()
            .flat_map(|record| self.overriders_of(&record.base_operation))
            .copied()
            .filter(|&peer| peer != id)
            .collect();
        peers.sort();
        peers.dedup();
        peers
    }

    /// Base operations overridden by more than one mixin.
    pub fn shared_operations(&self) -> impl Iterator<Item = (&BaseOperation, &[UnitId])> {
        self.overriders
            .iter()
            .filter(|(_, owners)| owners.len() > 1)
            .map(|(operation, owners)| (operation, owners.as_slice()))
    }

    /// Number of dependencies that resolved to a mixin.
    pub fn dependency_edge_count(&self) -> usize {
        self.units
            .iter()
            .map(|unit| unit.order_relevant_implementers().count())
            .sum()
    }

    /// Digest of the logical content, independent of insertion order.
    pub fn fingerprint(&self) -> SnapshotFingerprint {
        let mut hasher = Sha256::new();
        absorb(&mut hasher, self.target_type.as_bytes());

        let mut units: Vec<&MixinUnit> = self.units.iter().collect();
        units.sort_by(|a, b| a.name.cmp(&b.name));

        for unit in units {
            absorb(&mut hasher, unit.name.as_bytes());
            hasher.update([unit.accepts_alphabetic_ordering as u8]);

            let mut implementers: Vec<&str> = unit
                .order_relevant_implementers()
                .map(|id| self.name(id))
                .collect();
            // Multiplicity kept: repeated edges count against edge limits.
            implementers.sort_unstable();
            hasher.update((implementers.len() as u64).to_le_bytes());
            for name in implementers {
                absorb(&mut hasher, name.as_bytes());
            }

            let mut operations: Vec<&str> = unit
                .overrides
                .iter()
                .map(|record| record.base_operation.as_str())
                .collect();
            operations.sort_unstable();
            operations.dedup();
            hasher.update((operations.len() as u64).to_le_bytes());
            for operation in operations {
                absorb(&mut hasher, operation.as_bytes());
            }
        }

        SnapshotFingerprint(hasher.finalize().into())
    }
}

/// Length-prefixed write so adjacent fields cannot alias.
fn absorb(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

/// Incremental construction of a [`MixinSnapshot`]
#[derive(Debug)]
pub struct SnapshotBuilder {
    target_type: String,
    units: Vec<MixinUnit>,
    unknown: Vec<UnitId>,
}

impl SnapshotBuilder {
    pub fn new(target_type: impl Into<String>) -> Self {
        Self {
            target_type: target_type.into(),
            units: Vec::new(),
            unknown: Vec::new(),
        }
    }

    /// Add a mixin and return its id.
    pub fn add_unit(&mut self, name: impl Into<String>, accepts_alphabetic_ordering: bool) -> UnitId {
        let id = UnitId::new(self.units.len());
        self.units.push(MixinUnit {
            id,
            name: name.into(),
            accepts_alphabetic_ordering,
            dependencies: Vec::new(),
            overrides: Vec::new(),
        });
        id
    }

    /// Declare that `unit` requires `requirement`, implemented by `implementer` if resolved.
    pub fn add_dependency(
        &mut self,
        unit: UnitId,
        requirement: impl Into<String>,
        implementer: Option<UnitId>,
    ) -> &mut Self {
        match self.units.get_mut(unit.0) {
            Some(entry) => entry.dependencies.push(OrderRelevantDependency {
                requirement: requirement.into(),
                implementer,
            }),
            None => self.unknown.push(unit),
        }
        self
    }

    /// Shorthand for a dependency on another mixin of the snapshot.
    pub fn depends_on(&mut self, unit: UnitId, implementer: UnitId) -> &mut Self {
        let requirement = self
            .units
            .get(implementer.0)
            .map(|entry| entry.name.clone())
            .unwrap_or_else(|| implementer.to_string());
        self.add_dependency(unit, requirement, Some(implementer))
    }

    /// Declare that `unit` overrides `operation`.
    pub fn add_override(&mut self, unit: UnitId, operation: impl Into<BaseOperation>) -> &mut Self {
        match self.units.get_mut(unit.0) {
            Some(entry) => entry.overrides.push(OverrideRecord {
                base_operation: operation.into(),
            }),
            None => self.unknown.push(unit),
        }
        self
    }

    /// Validate and freeze the snapshot.
    pub fn build(self) -> Result<MixinSnapshot, SnapshotError> {
        if self.target_type.trim().is_empty() {
            return Err(SnapshotError::EmptyTargetType);
        }

        if let Some(&unit) = self.unknown.first() {
            return Err(SnapshotError::UnknownUnit(unit));
        }

        let mut names = HashSet::with_capacity(self.units.len());
        for unit in &self.units {
            if !names.insert(unit.name.as_str()) {
                return Err(SnapshotError::DuplicateName {
                    target_type: self.target_type.clone(),
                    name: unit.name.clone(),
                });
            }
        }

        for unit in &self.units {
            if let Some(implementer) = unit
                .order_relevant_implementers()
                .find(|id| id.0 >= self.units.len())
            {
                return Err(SnapshotError::UnknownImplementer {
                    unit: unit.name.clone(),
                    implementer,
                });
            }
        }

        let mut overriders: BTreeMap<BaseOperation, Vec<UnitId>> = BTreeMap::new();
        for unit in &self.units {
            for record in &unit.overrides {
                overriders
                    .entry(record.base_operation.clone())
                    .or_default()
                    .push(unit.id);
            }
        }
        for owners in overriders.values_mut() {
            owners.sort();
            owners.dedup();
        }

        Ok(MixinSnapshot {
            target_type: self.target_type,
            units: self.units,
            overriders,
        })
    }
}

/// Serialized form of a snapshot: implementers are referenced by name.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct SnapshotDocument {
    target_type: String,
    units: Vec<UnitDocument>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct UnitDocument {
    name: String,
    accepts_alphabetic_ordering: bool,
    #[serde(default)]
    dependencies: Vec<DependencyDocument>,
    #[serde(default)]
    overrides: Vec<BaseOperation>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct DependencyDocument {
    requirement: String,
    #[serde(default)]
    implementer: Option<String>,
}

impl TryFrom<SnapshotDocument> for MixinSnapshot {
    type Error = SnapshotError;

    fn try_from(document: SnapshotDocument) -> Result<Self, Self::Error> {
        let mut builder = SnapshotBuilder::new(document.target_type);

        let ids: HashMap<String, UnitId> = document
            .units
            .iter()
            .map(|unit| {
                let id = builder.add_unit(unit.name.clone(), unit.accepts_alphabetic_ordering);
                (unit.name.clone(), id)
            })
            .collect();

        for (index, unit) in document.units.into_iter().enumerate() {
            let id = UnitId::new(index);
            for dep in unit.dependencies {
                let implementer = match dep.implementer {
                    Some(name) => match ids.get(&name) {
                        Some(&implementer) => Some(implementer),
                        None => {
                            return Err(SnapshotError::UnknownImplementerName {
                                unit: unit.name,
                                implementer: name,
                            })
                        }
                    },
                    None => None,
                };
                builder.add_dependency(id, dep.requirement, implementer);
            }
            for operation in unit.overrides {
                builder.add_override(id, operation);
            }
        }

        builder.build()
    }
}

impl From<MixinSnapshot> for SnapshotDocument {
    fn from(snapshot: MixinSnapshot) -> Self {
        let units = snapshot
            .units
            .iter()
            .map(|unit| UnitDocument {
                name: unit.name.clone(),
                accepts_alphabetic_ordering: unit.accepts_alphabetic_ordering,
                dependencies: unit
                    .dependencies
                    .iter()
                    .map(|dep| DependencyDocument {
                        requirement: dep.requirement.clone(),
                        implementer: dep.implementer.map(|id| snapshot.name(id).to_string()),
                    })
                    .collect(),
                overrides: unit
                    .overrides
                    .iter()
                    .map(|record| record.base_operation.clone())
                    .collect(),
            })
            .collect();

        Self {
            target_type: snapshot.target_type,
            units,
        }
    }
}

/// Connected set of mixins under dependency and shared-override edges
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Members, ascending by ordinal display name
    pub members: Vec<UnitId>,
}

impl Group {
    pub fn new(members: Vec<UnitId>) -> Self {
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: UnitId) -> bool {
        self.members.contains(&id)
    }
}

/// A group in dependency-respecting order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedGroup {
    pub sequence: Vec<UnitId>,
}

impl OrderedGroup {
    pub fn new(sequence: Vec<UnitId>) -> Self {
        Self { sequence }
    }

    /// First-ranked member, used to order groups against each other.
    pub fn first(&self) -> Option<UnitId> {
        self.sequence.first().copied()
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// A mixin with its final position
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedMixin {
    pub unit: UnitId,
    pub name: String,
    /// Zero-based position in the composition order
    pub index: usize,
    /// Ordinal of the group this mixin was ordered in
    pub group: usize,
}

/// Final linearization of all mixins of a target type
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionOrder {
    pub target_type: String,
    pub entries: Vec<OrderedMixin>,
    /// Number of independent groups concatenated into this order
    pub group_count: usize,
}

impl CompositionOrder {
    /// Concatenate already ordered groups and assign positions.
    pub fn new(snapshot: &MixinSnapshot, groups: Vec<OrderedGroup>) -> Self {
        let group_count = groups.len();
        let entries = groups
            .into_iter()
            .enumerate()
            .flat_map(|(group, ordered)| ordered.sequence.into_iter().map(move |unit| (group, unit)))
            .enumerate()
            .map(|(index, (group, unit))| OrderedMixin {
                unit,
                name: snapshot.name(unit).to_string(),
                index,
                group,
            })
            .collect();

        Self {
            target_type: snapshot.target_type().to_string(),
            entries,
            group_count,
        }
    }

    pub fn index_of(&self, unit: UnitId) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.unit == unit)
            .map(|entry| entry.index)
    }

    pub fn unit_ids(&self) -> Vec<UnitId> {
        self.entries.iter().map(|entry| entry.unit).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
