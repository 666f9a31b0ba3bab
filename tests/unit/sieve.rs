//! BitSieve against trial division and known prime counts.

use super::common::is_prime_naive;
use psiscan::{BitSieve, ScanError};

#[test]
fn sieve_matches_trial_division_to_ten_thousand() {
    let sieve = BitSieve::new(10_000).unwrap();
    for i in 0..=10_000 {
        assert_eq!(sieve.is_prime(i), is_prime_naive(i), "disagree at {}", i);
    }
}

#[test]
fn sieve_limits_around_byte_boundaries() {
    for limit in [7, 8, 9, 15, 16, 17, 63, 64, 65] {
        let sieve = BitSieve::new(limit).unwrap();
        assert_eq!(sieve.byte_len() as u64, (limit >> 3) + 1);
        let expected = (0..=limit).filter(|&i| is_prime_naive(i)).count() as u64;
        assert_eq!(sieve.count_primes(), expected, "limit {}", limit);
    }
}

#[test]
fn sieve_prime_counts() {
    // π(10^k)
    let known = [(10, 4), (100, 25), (1_000, 168), (100_000, 9_592), (1_000_000, 78_498)];
    for (limit, count) in known {
        assert_eq!(BitSieve::new(limit).unwrap().count_primes(), count, "π({})", limit);
    }
}

#[test]
fn sieve_zero_and_one_not_prime() {
    let sieve = BitSieve::new(1).unwrap();
    assert!(!sieve.is_prime(0));
    assert!(!sieve.is_prime(1));
    assert_eq!(sieve.primes().count(), 0);
}

#[test]
fn sieve_primes_iterator_is_ascending_and_complete() {
    let sieve = BitSieve::new(1_000).unwrap();
    let primes: Vec<u64> = sieve.primes().collect();
    assert_eq!(primes.len(), 168);
    assert!(primes.windows(2).all(|w| w[0] < w[1]));
    assert!(primes.iter().all(|&p| is_prime_naive(p)));
    assert_eq!(primes.last(), Some(&997));
}

#[test]
fn sieve_allocation_failure_is_an_error() {
    match BitSieve::new(u64::MAX) {
        Err(ScanError::SieveAllocation { limit, bytes }) => {
            assert_eq!(limit, u64::MAX);
            assert_eq!(bytes, (u64::MAX >> 3) + 1);
        }
        other => panic!("expected allocation failure, got {:?}", other.map(|s| s.limit())),
    }
}
