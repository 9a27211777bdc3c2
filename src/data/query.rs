use super::error::NotFoundError;
use super::model::{Dataset, Neighbor, Record};

/// The `k` records closest to `reference_name`, nearest first.
///
/// Distance is [`Position::planar_distance`](super::model::Position::planar_distance).
/// The reference itself is excluded; ties keep table order.
pub fn nearest<'a>(
    dataset: &'a Dataset,
    reference_name: &str,
    k: usize,
) -> Result<Vec<Neighbor<'a>>, NotFoundError> {
    let reference = dataset.get(reference_name).ok_or_else(|| NotFoundError {
        name: reference_name.to_string(),
    })?;
    let origin = reference.position();

    let mut neighbors: Vec<Neighbor<'a>> = dataset
        .records()
        .iter()
        .filter(|r| r.name() != reference_name)
        .map(|record| Neighbor {
            record,
            distance: record.position().planar_distance(&origin),
        })
        .collect();

    // Stable sort: ties keep table order.
    neighbors.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    neighbors.truncate(k);
    Ok(neighbors)
}

/// The `k` highest scores, highest first; ties keep table order.
pub fn top_k(dataset: &Dataset, k: usize) -> Vec<&Record> {
    let mut ranked: Vec<&Record> = dataset.records().iter().collect();
    ranked.sort_by(|a, b| b.score().total_cmp(&a.score()));
    ranked.truncate(k);
    ranked
}

/// The `k` lowest scores, lowest first; ties keep table order.
pub fn bottom_k(dataset: &Dataset, k: usize) -> Vec<&Record> {
    let mut ranked: Vec<&Record> = dataset.records().iter().collect();
    ranked.sort_by(|a, b| a.score().total_cmp(&b.score()));
    ranked.truncate(k);
    ranked
}
