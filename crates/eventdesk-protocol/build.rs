// Uses protox (pure Rust protobuf compiler) to avoid requiring external protoc binary
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=proto/events.proto");
    let file_descriptors = protox::compile(["proto/events.proto"], ["proto"])?;
    tonic_build::configure()
        .build_server(true)
        .build_client(false)
        .compile_fds(file_descriptors)?;
    Ok(())
}
