fn main() -> std::process::ExitCode {
    prontuario_lib::run()
}
