//! Generates `schema.graphql`, the SDL of Linkfeed's GraphQL API, at build
//! time.
