pub mod visibility_policy;
