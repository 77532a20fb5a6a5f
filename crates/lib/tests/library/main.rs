mod synth_tests;
