//! Generates `schema.json`, the JSON Schema of Linkfeed's YAML configuration
//! file, at build time. Editors can use it to validate and autocomplete
//! configuration files.
