mod analytics_tests;
mod predict_tests;
mod routing_tests;
