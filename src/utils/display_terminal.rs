//! 터미널 출력 포맷팅 유틸리티
//!
//! 서버 부트스트랩(저장소 연결, 인덱스 생성, 관리자 계정 확인) 진행 상황을
//! 터미널에 표시합니다. 로그와 별개로 사람이 읽기 위한 출력입니다.

/// 박스 형태의 제목을 출력합니다.
pub fn print_boxed_title(title: &str) {
    // 고정 너비 50칸 사용 (박스 내부 콘텐츠)
    let content_width = 50;
    let border = "═".repeat(content_width);

    println!("╔{}╗", border);
    println!("║{:^50}║", title);
    println!("╚{}╝", border);
}

pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

pub fn print_step_complete(step: u8, description: &str, detail: &str) {
    println!("✓ Step {}: {} ({})", step, description, detail);
}

pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// 부트스트랩 완료 요약
pub fn print_startup_summary(storage: &str, cache: &str, bind_address: &str) {
    println!();
    print_boxed_title("🍳 RECIPE SERVICE READY");
    println!("   📦 Storage: {}", storage);
    println!("   ⚡ Cache: {}", cache);
    println!("   🌐 Listening: http://{}", bind_address);
    println!();
}
