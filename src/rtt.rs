//! Destination round-trip time.

use crate::models::HopResult;

/// Computes the representative RTT of a traceroute: the mean of the positive
/// RTT samples of the last hop.
///
/// Only the last hop is considered; earlier hops never influence the result.
/// Samples with no reply (absent, zero or negative RTT) are excluded from the
/// average. Returns `0.0` when there are no hops, when the last hop has no
/// samples, or when none of its samples got a reply.
pub fn reduce(hops: &[HopResult]) -> f64 {
    let Some(last_hop) = hops.last() else {
        return 0.0;
    };

    let (total, count) = last_hop
        .result
        .iter()
        .filter_map(|sample| sample.rtt)
        .filter(|rtt| *rtt > 0.0)
        .fold((0.0, 0usize), |(total, count), rtt| (total + rtt, count + 1));

    if count == 0 {
        return 0.0;
    }

    total / count as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sample;

    fn hop(index: u32, rtts: &[Option<f64>]) -> HopResult {
        HopResult {
            hop: index,
            result: rtts.iter().map(|rtt| Sample { rtt: *rtt }).collect(),
        }
    }

    #[test]
    fn test_reduce_no_hops() {
        assert_eq!(reduce(&[]), 0.0);
    }

    #[test]
    fn test_reduce_last_hop_without_samples() {
        let hops = vec![hop(1, &[Some(5.0)]), hop(2, &[])];
        assert_eq!(reduce(&hops), 0.0);
    }

    #[test]
    fn test_reduce_all_samples_without_reply() {
        let hops = vec![hop(1, &[None, Some(0.0), Some(-1.5)])];
        assert_eq!(reduce(&hops), 0.0);
    }

    #[test]
    fn test_reduce_mean_of_positive_samples() {
        let hops = vec![hop(1, &[Some(10.0), Some(20.0)])];
        assert_eq!(reduce(&hops), 15.0);
    }

    #[test]
    fn test_reduce_skips_timeouts_in_mean() {
        let hops = vec![hop(1, &[Some(12.0), None, Some(0.0), Some(18.0)])];
        assert_eq!(reduce(&hops), 15.0);
    }

    #[test]
    fn test_reduce_ignores_earlier_hops() {
        let hops = vec![
            hop(1, &[Some(1000.0), Some(2000.0)]),
            hop(2, &[Some(500.0)]),
            hop(3, &[Some(30.0), Some(31.0), Some(32.0)]),
        ];
        assert_eq!(reduce(&hops), 31.0);

        let only_last = vec![hop(3, &[Some(30.0), Some(31.0), Some(32.0)])];
        assert_eq!(reduce(&hops), reduce(&only_last));
    }

    #[test]
    fn test_reduce_earlier_replies_do_not_rescue_silent_last_hop() {
        let hops = vec![hop(1, &[Some(3.0)]), hop(2, &[None, None, None])];
        assert_eq!(reduce(&hops), 0.0);
    }
}
