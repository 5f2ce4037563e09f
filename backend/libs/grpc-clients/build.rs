fn main() {
    // Client stubs only; identity-service builds its own server side.
    tonic_build::configure()
        .build_server(false)
        .build_client(true)
        .compile_protos(
            &["../../proto/services/identity_service.proto"],
            &["../../proto/services"],
        )
        .unwrap_or_else(|e| panic!("Failed to compile identity_service.proto: {}", e));

    println!("cargo:rerun-if-changed=../../proto/services/identity_service.proto");
}
