use kernels::{naive, optimized, ArraySet, KernelKind};
use proptest::prelude::*;
use rstest::*;

#[fixture]
fn four() -> ArraySet {
    ArraySet::new(4).expect("small set")
}

#[rstest]
#[case(KernelKind::Unoptimized)]
#[case(KernelKind::Optimized)]
fn test_boundary_scenario(mut four: ArraySet, #[case] kind: KernelKind) {
    // b=[0,1,2,3], c=[4,3,2,1] → b+c=4 везде, плюс 1
    assert_eq!(four.b(), &[0, 1, 2, 3]);
    assert_eq!(four.c(), &[4, 3, 2, 1]);

    kind.run(&mut four);

    assert_eq!(four.a(), &[5, 5, 5, 5]);
    assert_eq!(four.invariant(), 4);
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(5)]
#[case(100_001)]
fn test_odd_lengths_process_trailing_index(#[case] len: usize) {
    let mut set = ArraySet::new(len).unwrap();
    optimized::run(&mut set);

    assert_eq!(set.first_mismatch(), None);
    assert_eq!(set.a()[len - 1], set.b()[len - 1] + set.c()[len - 1] + 1);
}

#[test]
fn test_demo_size_equivalence() {
    let mut slow = ArraySet::new(100_000).unwrap();
    let mut fast = slow.clone();

    naive::run(&mut slow);
    optimized::run(&mut fast);

    assert_eq!(slow, fast);
    // b[i] + c[i] = N для всех i
    assert!(fast.a().iter().all(|&v| v == 100_001));
    assert_eq!(fast.invariant(), 100_000);
}

#[test]
fn test_rerun_is_deterministic() {
    let mut set = ArraySet::new(1_000).unwrap();

    naive::run(&mut set);
    let first = set.a().to_vec();

    set.reset();
    naive::run(&mut set);

    assert_eq!(set.a(), first.as_slice());
}

#[test]
fn test_kernel_ignores_previous_contents_of_a() {
    let mut set = ArraySet::new(6).unwrap();
    optimized::run(&mut set);
    // второй прогон без reset: результат зависит только от b и c
    optimized::run(&mut set);
    assert_eq!(set.first_mismatch(), None);
}

proptest! {
    #[test]
    fn prop_kernels_agree(len in 0usize..2_048) {
        let mut slow = ArraySet::new(len).unwrap();
        let mut fast = ArraySet::new(len).unwrap();

        naive::run(&mut slow);
        optimized::run(&mut fast);

        prop_assert_eq!(slow.a(), fast.a());
        prop_assert_eq!(slow.invariant(), fast.invariant());
    }

    #[test]
    fn prop_invariant_holds(len in 1usize..2_048, optimized_first in any::<bool>()) {
        let kind = if optimized_first { KernelKind::Optimized } else { KernelKind::Unoptimized };
        let mut set = ArraySet::new(len).unwrap();

        kind.run(&mut set);

        prop_assert_eq!(set.first_mismatch(), None);
        prop_assert_eq!(set.invariant(), set.b()[0] + set.c()[0]);
    }
}
