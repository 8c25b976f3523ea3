mod review_tests;
