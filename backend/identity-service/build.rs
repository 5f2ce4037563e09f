// Build script for identity-service
// identity-service PROVIDES IdentityService (server implementation).
// Client code is also generated for integration tests.
fn main() {
    println!("cargo:rerun-if-changed=../proto/services/identity_service.proto");

    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(
            &["../proto/services/identity_service.proto"],
            &["../proto/services"],
        )
        .expect("Failed to compile identity_service.proto for identity-service");
}
