/// Indices of the `k` highest scores, returned in ascending index order.
///
/// Equal scores favour the earlier index. When `k` covers every score, every
/// index is returned.
pub fn select_top_k(scores: &[f64], k: usize) -> Vec<usize> {
    let mut ranked: Vec<usize> = (0..scores.len()).collect();
    if k < scores.len() {
        ranked.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(a.cmp(&b)));
        ranked.truncate(k);
        ranked.sort_unstable();
    }
    ranked
}
