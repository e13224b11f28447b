use ahash::{
    HashSet,
    HashSetExt,
};
use anyhow::Result;
use log::warn;
use teambuilder_data::{
    DataStore,
    SpeciesId,
};

/// A species on the walk stack, with the index of the next predecessor to visit.
struct Frame {
    species: SpeciesId,
    predecessors: Vec<SpeciesId>,
    next: usize,
}

impl Frame {
    fn new(data: &dyn DataStore, species: SpeciesId) -> Result<Self> {
        Ok(Self {
            species,
            predecessors: data.get_predecessors(species)?,
            next: 0,
        })
    }
}

/// Resolves the evolution chain leading to a species.
///
/// The returned list starts with the oldest ancestors and ends with `species` itself. Every
/// ancestor appears after its own ancestors, and each species appears once, even when the graph
/// merges (for example, two branches evolving into the same species).
///
/// The walk is iterative, so deep graphs cannot overflow the stack. A predecessor that is still on
/// the walk stack closes a cycle; the edge is logged and skipped, and the chain built so far is
/// kept. An unknown species has an empty chain.
pub fn evolution_chain(data: &dyn DataStore, species: SpeciesId) -> Result<Vec<SpeciesId>> {
    if data.get_species(species)?.is_none() {
        return Ok(Vec::new());
    }

    let mut chain = Vec::new();
    let mut visited = HashSet::new();
    visited.insert(species);
    let mut stack = vec![Frame::new(data, species)?];

    while let Some(frame) = stack.last_mut() {
        let Some(predecessor) = frame.predecessors.get(frame.next).copied() else {
            chain.push(frame.species);
            stack.pop();
            continue;
        };
        frame.next += 1;
        let current = frame.species;

        if visited.insert(predecessor) {
            stack.push(Frame::new(data, predecessor)?);
        } else if stack.iter().any(|frame| frame.species == predecessor) {
            warn!(
                "evolution cycle detected: {predecessor} evolves into {current}, which leads back \
                 to {predecessor}; skipping edge while resolving the chain of {species}"
            );
        }
    }

    Ok(chain)
}
