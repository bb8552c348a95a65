pub mod agent_orchestrator_service;
pub mod crew_config;
pub mod model_service;
pub mod orchestrator_steps;
pub mod output_store;
pub mod pdf_service;
pub mod quiz_pipeline_service;
pub mod step_executor;
