mod fractal_tests;
