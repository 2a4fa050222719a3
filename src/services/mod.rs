pub mod day_namer;
pub mod day_profile;
pub mod essential_planner;
pub mod fallback_scheduler;
pub mod genai_service;
pub mod prompt_templates;
pub mod schedule_optimizer;
pub mod schedule_utils;
pub mod schedule_validator;
pub mod slot_packer;
pub mod task_distributor;
pub mod task_ranker;
pub mod theme_catalog;
pub mod work_slots;
