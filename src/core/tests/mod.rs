mod engine_invariant_tests;
