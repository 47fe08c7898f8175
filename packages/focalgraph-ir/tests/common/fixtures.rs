//! Test fixture generators
//!
//! Linked modules in the shape clang -O0 emits for GoogleTest suites.
//! Mangled names follow the Itanium ABI so the gtest preset patterns apply.

#![allow(dead_code)]

pub const ADD_INT: &str = "@_Z7add_intii";
pub const ADD_TEST: &str = "@_ZN15ADDTEST_eq_Test8TestBodyEv";

pub const STACK_PUSH: &str = "@_ZN5Stack4pushEi";
pub const STACK_PEEK: &str = "@_ZN5Stack4peekEv";
pub const STACK_FULL: &str = "@_ZN5Stack4fullEv";
pub const STACK_CTOR: &str = "@_ZN5StackC2Ev";
pub const STACK_CTOR_ALIAS: &str = "@_ZN5StackC1Ev";
pub const STACK_TEST: &str = "@_ZN15STACK_push_Test8TestBodyEv";

pub const SET_FIRST_NAME: &str = "@_ZN7Profile12setFirstNameEPKc";
pub const GET_FIRST_NAME: &str = "@_ZN7Profile12getFirstNameEv";
pub const ASSIGN_STRING: &str = "@_Z12assignStringPcPKc";
pub const PROFILE_TEST: &str = "@_ZN17PROFILE_name_Test8TestBodyEv";

pub const CONSTANT_TEST: &str = "@_ZN18CONSTANT_fold_Test8TestBodyEv";

pub const MULTIPLY: &str = "@_Z8multiplyii";
pub const EQ_HELPER: &str = "@_ZN7testing8internal8EqHelper7CompareIiiLPv0EEENS_15AssertionResultEPKcS6_RKT_RKT0_";
pub const CMP_HELPER_EQ: &str = "@_ZN7testing8internal11CmpHelperEQIiiEENS_15AssertionResultEPKcS4_RKT_RKT0_";
pub const CMP_HELPER_EQ_FAILURE: &str = "@_ZN7testing8internal18CmpHelperEQFailureIiiEENS_15AssertionResultEPKcS4_RKT_RKT0_";
pub const MULTIPLY_TEST: &str = "@_ZN16MULTIPLY_eq_Test8TestBodyEv";

pub const STARTUP: &str = "@_GLOBAL__sub_I_add_test.cpp";

/// Wrap function definitions in a module header and attribute groups
pub fn fixture_module(source_file: &str, definitions: &str) -> String {
    format!(
        r#"; ModuleID = '{source_file}'
source_filename = "{source_file}"
target datalayout = "e-m:e-p270:32:32-p271:32:32-p272:64:64-i64:64-f80:128-n8:16:32:64-S128"
target triple = "x86_64-pc-linux-gnu"

%"class.testing::AssertionResult" = type {{ i8, %"class.std::unique_ptr" }}
%"class.std::unique_ptr" = type {{ %"struct.std::_Head_base" }}
%"struct.std::_Head_base" = type {{ %"class.std::__cxx11::basic_string"* }}
%"class.std::__cxx11::basic_string" = type opaque
%"class.testing::Test" = type {{ i32 (...)**, %"class.std::unique_ptr" }}

@.str = private unnamed_addr constant [2 x i8] c"3\00", align 1
@.str.1 = private unnamed_addr constant [12 x i8] c"add_int(1,2)\00", align 1

{definitions}
declare i32 @__gxx_personality_v0(...)

declare void @llvm.memcpy.p0i8.p0i8.i64(i8* noalias nocapture writeonly, i8* noalias nocapture readonly, i64, i1 immarg) #2

attributes #0 = {{ mustprogress noinline nounwind optnone uwtable "frame-pointer"="all" "min-legal-vector-width"="0" "no-trapping-math"="true" "stack-protector-buffer-size"="8" "target-cpu"="x86-64" }}
attributes #1 = {{ mustprogress noinline optnone uwtable "frame-pointer"="all" "min-legal-vector-width"="0" "no-trapping-math"="true" "stack-protector-buffer-size"="8" "target-cpu"="x86-64" }}
attributes #2 = {{ argmemonly nofree nounwind willreturn }}
attributes #3 = {{ nounwind }}

!llvm.module.flags = !{{!0}}
!0 = !{{i32 1, !"wchar_size", i32 4}}
"#
    )
}

/// `EXPECT_EQ(3, add_int(1, 2))`; the result is computed from by-value inputs
pub fn fixture_add_int() -> String {
    fixture_module(
        "add_test.cpp",
        r#"; Function Attrs: mustprogress noinline nounwind optnone uwtable
define dso_local noundef i32 @_Z7add_intii(i32 noundef %0, i32 noundef %1) #0 {
  %3 = alloca i32, align 4
  %4 = alloca i32, align 4
  store i32 %0, i32* %3, align 4
  store i32 %1, i32* %4, align 4
  %5 = load i32, i32* %3, align 4
  %6 = load i32, i32* %4, align 4
  %7 = add nsw i32 %5, %6
  ret i32 %7
}

; Function Attrs: mustprogress noinline optnone uwtable
define dso_local void @_ZN15ADDTEST_eq_Test8TestBodyEv(%"class.testing::Test"* noundef nonnull align 8 dereferenceable(16) %0) unnamed_addr #1 align 2 personality i8* bitcast (i32 (...)* @__gxx_personality_v0 to i8*) {
  %2 = alloca %"class.testing::Test"*, align 8
  %3 = alloca %"class.testing::AssertionResult", align 8
  %4 = alloca i32, align 4
  %5 = alloca i32, align 4
  %6 = alloca i8*, align 8
  %7 = alloca i32, align 4
  store %"class.testing::Test"* %0, %"class.testing::Test"** %2, align 8
  store i32 3, i32* %4, align 4
  %8 = call noundef i32 @_Z7add_intii(i32 noundef 1, i32 noundef 2)
  store i32 %8, i32* %5, align 4
  call void @_ZN7testing8internal8EqHelper7CompareIiiLPv0EEENS_15AssertionResultEPKcS6_RKT_RKT0_(%"class.testing::AssertionResult"* sret(%"class.testing::AssertionResult") align 8 %3, i8* noundef getelementptr inbounds ([2 x i8], [2 x i8]* @.str, i64 0, i64 0), i8* noundef getelementptr inbounds ([12 x i8], [12 x i8]* @.str.1, i64 0, i64 0), i32* noundef nonnull align 4 dereferenceable(4) %4, i32* noundef nonnull align 4 dereferenceable(4) %5)
  %9 = invoke noundef zeroext i1 @_ZNK7testing15AssertionResultcvbEv(%"class.testing::AssertionResult"* noundef nonnull align 8 dereferenceable(16) %3)
          to label %10 unwind label %13

10:                                               ; preds = %1
  br i1 %9, label %11, label %12

11:                                               ; preds = %10
  br label %12

12:                                               ; preds = %11, %10
  call void @_ZN7testing15AssertionResultD2Ev(%"class.testing::AssertionResult"* noundef nonnull align 8 dereferenceable(16) %3) #3
  ret void

13:                                               ; preds = %1
  %14 = landingpad { i8*, i32 }
          cleanup
  %15 = extractvalue { i8*, i32 } %14, 0
  store i8* %15, i8** %6, align 8
  %16 = extractvalue { i8*, i32 } %14, 1
  store i32 %16, i32* %7, align 4
  call void @_ZN7testing15AssertionResultD2Ev(%"class.testing::AssertionResult"* noundef nonnull align 8 dereferenceable(16) %3) #3
  br label %17

17:                                               ; preds = %13
  %18 = load i8*, i8** %6, align 8
  %19 = load i32, i32* %7, align 4
  %20 = insertvalue { i8*, i32 } undef, i8* %18, 0
  %21 = insertvalue { i8*, i32 } %20, i32 %19, 1
  resume { i8*, i32 } %21
}

; Function Attrs: noinline uwtable
define internal void @_GLOBAL__sub_I_add_test.cpp() #1 section ".text.startup" {
  call void @__cxx_global_var_init()
  ret void
}

declare void @__cxx_global_var_init()

declare noundef zeroext i1 @_ZNK7testing15AssertionResultcvbEv(%"class.testing::AssertionResult"* noundef nonnull align 8 dereferenceable(16))

declare void @_ZN7testing15AssertionResultD2Ev(%"class.testing::AssertionResult"* noundef nonnull align 8 dereferenceable(16)) #3

declare void @_ZN7testing8internal8EqHelper7CompareIiiLPv0EEENS_15AssertionResultEPKcS6_RKT_RKT0_(%"class.testing::AssertionResult"* sret(%"class.testing::AssertionResult") align 8, i8* noundef, i8* noundef, i32* noundef nonnull align 4 dereferenceable(4), i32* noundef nonnull align 4 dereferenceable(4))
"#,
    )
}

/// `Stack s; s.push(5); EXPECT_EQ(5, s.peek());`
///
/// `peek` only reads the stack; `push` writes it through a field pointer
/// of the reloaded `this`.
pub fn fixture_stack() -> String {
    fixture_module(
        "stack_test.cpp",
        r#"%class.Stack = type { [100 x i32], i32 }

@_ZN5StackC1Ev = dso_local unnamed_addr alias void (%class.Stack*), void (%class.Stack*)* @_ZN5StackC2Ev

; Function Attrs: noinline nounwind optnone uwtable
define dso_local void @_ZN5StackC2Ev(%class.Stack* noundef nonnull align 4 dereferenceable(404) %0) unnamed_addr #0 align 2 {
  %2 = alloca %class.Stack*, align 8
  store %class.Stack* %0, %class.Stack** %2, align 8
  %3 = load %class.Stack*, %class.Stack** %2, align 8
  %4 = getelementptr inbounds %class.Stack, %class.Stack* %3, i32 0, i32 1
  store i32 -1, i32* %4, align 4
  ret void
}

; Function Attrs: mustprogress noinline nounwind optnone uwtable
define dso_local noundef zeroext i1 @_ZN5Stack4fullEv(%class.Stack* noundef nonnull align 4 dereferenceable(404) %0) #0 align 2 {
  %2 = alloca %class.Stack*, align 8
  store %class.Stack* %0, %class.Stack** %2, align 8
  %3 = load %class.Stack*, %class.Stack** %2, align 8
  %4 = getelementptr inbounds %class.Stack, %class.Stack* %3, i32 0, i32 1
  %5 = load i32, i32* %4, align 4
  %6 = icmp eq i32 %5, 99
  ret i1 %6
}

; Function Attrs: mustprogress noinline nounwind optnone uwtable
define dso_local void @_ZN5Stack4pushEi(%class.Stack* noundef nonnull align 4 dereferenceable(404) %0, i32 noundef %1) #0 align 2 {
  %3 = alloca %class.Stack*, align 8
  %4 = alloca i32, align 4
  store %class.Stack* %0, %class.Stack** %3, align 8
  store i32 %1, i32* %4, align 4
  %5 = load %class.Stack*, %class.Stack** %3, align 8
  %6 = call noundef zeroext i1 @_ZN5Stack4fullEv(%class.Stack* noundef nonnull align 4 dereferenceable(404) %5)
  br i1 %6, label %15, label %7

7:                                                ; preds = %2
  %8 = load i32, i32* %4, align 4
  %9 = getelementptr inbounds %class.Stack, %class.Stack* %5, i32 0, i32 1
  %10 = load i32, i32* %9, align 4
  %11 = add nsw i32 %10, 1
  store i32 %11, i32* %9, align 4
  %12 = getelementptr inbounds %class.Stack, %class.Stack* %5, i32 0, i32 0
  %13 = sext i32 %11 to i64
  %14 = getelementptr inbounds [100 x i32], [100 x i32]* %12, i64 0, i64 %13
  store i32 %8, i32* %14, align 4
  br label %15

15:                                               ; preds = %7, %2
  ret void
}

; Function Attrs: mustprogress noinline nounwind optnone uwtable
define dso_local noundef i32 @_ZN5Stack4peekEv(%class.Stack* noundef nonnull align 4 dereferenceable(404) %0) #0 align 2 {
  %2 = alloca %class.Stack*, align 8
  store %class.Stack* %0, %class.Stack** %2, align 8
  %3 = load %class.Stack*, %class.Stack** %2, align 8
  %4 = getelementptr inbounds %class.Stack, %class.Stack* %3, i32 0, i32 0
  %5 = getelementptr inbounds %class.Stack, %class.Stack* %3, i32 0, i32 1
  %6 = load i32, i32* %5, align 4
  %7 = sext i32 %6 to i64
  %8 = getelementptr inbounds [100 x i32], [100 x i32]* %4, i64 0, i64 %7
  %9 = load i32, i32* %8, align 4
  ret i32 %9
}

; Function Attrs: mustprogress noinline optnone uwtable
define dso_local void @_ZN15STACK_push_Test8TestBodyEv(%"class.testing::Test"* noundef nonnull align 8 dereferenceable(16) %0) unnamed_addr #1 align 2 personality i8* bitcast (i32 (...)* @__gxx_personality_v0 to i8*) {
  %2 = alloca %"class.testing::Test"*, align 8
  %3 = alloca %class.Stack, align 4
  %4 = alloca %"class.testing::AssertionResult", align 8
  %5 = alloca i32, align 4
  %6 = alloca i32, align 4
  %7 = alloca i8*, align 8
  %8 = alloca i32, align 4
  store %"class.testing::Test"* %0, %"class.testing::Test"** %2, align 8
  call void @_ZN5StackC1Ev(%class.Stack* noundef nonnull align 4 dereferenceable(404) %3)
  invoke void @_ZN5Stack4pushEi(%class.Stack* noundef nonnull align 4 dereferenceable(404) %3, i32 noundef 5)
          to label %9 unwind label %13

9:                                                ; preds = %1
  store i32 5, i32* %5, align 4
  %10 = invoke noundef i32 @_ZN5Stack4peekEv(%class.Stack* noundef nonnull align 4 dereferenceable(404) %3)
          to label %11 unwind label %13

11:                                               ; preds = %9
  store i32 %10, i32* %6, align 4
  invoke void @_ZN7testing8internal8EqHelper7CompareIiiLPv0EEENS_15AssertionResultEPKcS6_RKT_RKT0_(%"class.testing::AssertionResult"* sret(%"class.testing::AssertionResult") align 8 %4, i8* noundef getelementptr inbounds ([2 x i8], [2 x i8]* @.str, i64 0, i64 0), i8* noundef getelementptr inbounds ([12 x i8], [12 x i8]* @.str.1, i64 0, i64 0), i32* noundef nonnull align 4 dereferenceable(4) %5, i32* noundef nonnull align 4 dereferenceable(4) %6)
          to label %12 unwind label %13

12:                                               ; preds = %11
  call void @_ZN7testing15AssertionResultD2Ev(%"class.testing::AssertionResult"* noundef nonnull align 8 dereferenceable(16) %4) #3
  ret void

13:                                               ; preds = %11, %9, %1
  %14 = landingpad { i8*, i32 }
          cleanup
  %15 = extractvalue { i8*, i32 } %14, 0
  store i8* %15, i8** %7, align 8
  %16 = extractvalue { i8*, i32 } %14, 1
  store i32 %16, i32* %8, align 4
  br label %17

17:                                               ; preds = %13
  %18 = load i8*, i8** %7, align 8
  %19 = load i32, i32* %8, align 4
  %20 = insertvalue { i8*, i32 } undef, i8* %18, 0
  %21 = insertvalue { i8*, i32 } %20, i32 %19, 1
  resume { i8*, i32 } %21
}

declare void @_ZN7testing15AssertionResultD2Ev(%"class.testing::AssertionResult"* noundef nonnull align 8 dereferenceable(16)) #3
"#,
    )
}

/// `p.setFirstName("Alice"); EXPECT_STREQ("Alice", p.getFirstName());`
///
/// The getter returns a field pointer; the setter reaches the same field
/// through `assignString`, which copies into it with `llvm.memcpy`.
pub fn fixture_profile() -> String {
    fixture_module(
        "profile_test.cpp",
        r#"%struct.Profile = type { [32 x i8], [32 x i8], i32 }

@.str.2 = private unnamed_addr constant [6 x i8] c"Alice\00", align 1
@.str.3 = private unnamed_addr constant [17 x i8] c"p.getFirstName()\00", align 1

; Function Attrs: mustprogress noinline nounwind optnone uwtable
define dso_local void @_Z12assignStringPcPKc(i8* noundef %0, i8* noundef %1) #0 {
  %3 = alloca i8*, align 8
  %4 = alloca i8*, align 8
  store i8* %0, i8** %3, align 8
  store i8* %1, i8** %4, align 8
  %5 = load i8*, i8** %3, align 8
  %6 = load i8*, i8** %4, align 8
  call void @llvm.memcpy.p0i8.p0i8.i64(i8* align 1 %5, i8* align 1 %6, i64 32, i1 false)
  ret void
}

; Function Attrs: mustprogress noinline nounwind optnone uwtable
define dso_local void @_ZN7Profile12setFirstNameEPKc(%struct.Profile* noundef nonnull align 4 dereferenceable(68) %0, i8* noundef %1) #0 align 2 {
  %3 = alloca %struct.Profile*, align 8
  %4 = alloca i8*, align 8
  store %struct.Profile* %0, %struct.Profile** %3, align 8
  store i8* %1, i8** %4, align 8
  %5 = load %struct.Profile*, %struct.Profile** %3, align 8
  %6 = getelementptr inbounds %struct.Profile, %struct.Profile* %5, i32 0, i32 0
  %7 = getelementptr inbounds [32 x i8], [32 x i8]* %6, i64 0, i64 0
  %8 = load i8*, i8** %4, align 8
  call void @_Z12assignStringPcPKc(i8* noundef %7, i8* noundef %8)
  ret void
}

; Function Attrs: mustprogress noinline nounwind optnone uwtable
define dso_local noundef i8* @_ZN7Profile12getFirstNameEv(%struct.Profile* noundef nonnull align 4 dereferenceable(68) %0) #0 align 2 {
  %2 = alloca %struct.Profile*, align 8
  store %struct.Profile* %0, %struct.Profile** %2, align 8
  %3 = load %struct.Profile*, %struct.Profile** %2, align 8
  %4 = getelementptr inbounds %struct.Profile, %struct.Profile* %3, i32 0, i32 0
  %5 = getelementptr inbounds [32 x i8], [32 x i8]* %4, i64 0, i64 0
  ret i8* %5
}

; Function Attrs: mustprogress noinline optnone uwtable
define dso_local void @_ZN17PROFILE_name_Test8TestBodyEv(%"class.testing::Test"* noundef nonnull align 8 dereferenceable(16) %0) unnamed_addr #1 align 2 {
  %2 = alloca %"class.testing::Test"*, align 8
  %3 = alloca %struct.Profile, align 4
  %4 = alloca %"class.testing::AssertionResult", align 8
  store %"class.testing::Test"* %0, %"class.testing::Test"** %2, align 8
  call void @_ZN7Profile12setFirstNameEPKc(%struct.Profile* noundef nonnull align 4 dereferenceable(68) %3, i8* noundef getelementptr inbounds ([6 x i8], [6 x i8]* @.str.2, i64 0, i64 0))
  %5 = call noundef i8* @_ZN7Profile12getFirstNameEv(%struct.Profile* noundef nonnull align 4 dereferenceable(68) %3)
  call void @_ZN7testing8internal14CmpHelperSTREQEPKcS2_S2_S2_(%"class.testing::AssertionResult"* sret(%"class.testing::AssertionResult") align 8 %4, i8* noundef getelementptr inbounds ([2 x i8], [2 x i8]* @.str, i64 0, i64 0), i8* noundef getelementptr inbounds ([17 x i8], [17 x i8]* @.str.3, i64 0, i64 0), i8* noundef getelementptr inbounds ([6 x i8], [6 x i8]* @.str.2, i64 0, i64 0), i8* noundef %5)
  call void @_ZN7testing15AssertionResultD2Ev(%"class.testing::AssertionResult"* noundef nonnull align 8 dereferenceable(16) %4) #3
  ret void
}

declare void @_ZN7testing8internal14CmpHelperSTREQEPKcS2_S2_S2_(%"class.testing::AssertionResult"* sret(%"class.testing::AssertionResult") align 8, i8* noundef, i8* noundef, i8* noundef, i8* noundef)

declare void @_ZN7testing15AssertionResultD2Ev(%"class.testing::AssertionResult"* noundef nonnull align 8 dereferenceable(16)) #3
"#,
    )
}

/// `EXPECT_EQ(4, 2 + 2)`; clang folds both sides to constants
pub fn fixture_constant_fold() -> String {
    fixture_module(
        "constant_test.cpp",
        r#"; Function Attrs: mustprogress noinline optnone uwtable
define dso_local void @_ZN18CONSTANT_fold_Test8TestBodyEv(%"class.testing::Test"* noundef nonnull align 8 dereferenceable(16) %0) unnamed_addr #1 align 2 {
  %2 = alloca %"class.testing::Test"*, align 8
  %3 = alloca %"class.testing::AssertionResult", align 8
  %4 = alloca i32, align 4
  %5 = alloca i32, align 4
  store %"class.testing::Test"* %0, %"class.testing::Test"** %2, align 8
  store i32 4, i32* %4, align 4
  store i32 4, i32* %5, align 4
  call void @_ZN7testing8internal11CmpHelperEQIiiEENS_15AssertionResultEPKcS4_RKT_RKT0_(%"class.testing::AssertionResult"* sret(%"class.testing::AssertionResult") align 8 %3, i8* noundef getelementptr inbounds ([2 x i8], [2 x i8]* @.str, i64 0, i64 0), i8* noundef getelementptr inbounds ([12 x i8], [12 x i8]* @.str.1, i64 0, i64 0), i32* noundef nonnull align 4 dereferenceable(4) %4, i32* noundef nonnull align 4 dereferenceable(4) %5)
  ret void
}

declare void @_ZN7testing8internal11CmpHelperEQIiiEENS_15AssertionResultEPKcS4_RKT_RKT0_(%"class.testing::AssertionResult"* sret(%"class.testing::AssertionResult") align 8, i8* noundef, i8* noundef, i32* noundef nonnull align 4 dereferenceable(4), i32* noundef nonnull align 4 dereferenceable(4))
"#,
    )
}

/// `EXPECT_EQ(6, multiply(2, 3))` with the gtest helper templates linked in
///
/// `EqHelper::Compare` forwards to `CmpHelperEQ`, which calls
/// `CmpHelperEQFailure` on mismatch. None of them may be expanded.
pub fn fixture_multiply_with_helpers() -> String {
    fixture_module(
        "multiply_test.cpp",
        r#"; Function Attrs: mustprogress noinline nounwind optnone uwtable
define dso_local noundef i32 @_Z8multiplyii(i32 noundef %0, i32 noundef %1) #0 {
  %3 = mul nsw i32 %0, %1
  ret i32 %3
}

; Function Attrs: mustprogress noinline optnone uwtable
define dso_local void @_ZN16MULTIPLY_eq_Test8TestBodyEv(%"class.testing::Test"* noundef nonnull align 8 dereferenceable(16) %0) unnamed_addr #1 align 2 {
  %2 = alloca %"class.testing::Test"*, align 8
  %3 = alloca %"class.testing::AssertionResult", align 8
  %4 = alloca i32, align 4
  %5 = alloca i32, align 4
  store %"class.testing::Test"* %0, %"class.testing::Test"** %2, align 8
  store i32 6, i32* %4, align 4
  %6 = call noundef i32 @_Z8multiplyii(i32 noundef 2, i32 noundef 3)
  store i32 %6, i32* %5, align 4
  call void @_ZN7testing8internal8EqHelper7CompareIiiLPv0EEENS_15AssertionResultEPKcS6_RKT_RKT0_(%"class.testing::AssertionResult"* sret(%"class.testing::AssertionResult") align 8 %3, i8* noundef getelementptr inbounds ([2 x i8], [2 x i8]* @.str, i64 0, i64 0), i8* noundef getelementptr inbounds ([12 x i8], [12 x i8]* @.str.1, i64 0, i64 0), i32* noundef nonnull align 4 dereferenceable(4) %4, i32* noundef nonnull align 4 dereferenceable(4) %5)
  ret void
}

; Function Attrs: mustprogress noinline optnone uwtable
define linkonce_odr dso_local void @_ZN7testing8internal8EqHelper7CompareIiiLPv0EEENS_15AssertionResultEPKcS6_RKT_RKT0_(%"class.testing::AssertionResult"* noalias sret(%"class.testing::AssertionResult") align 8 %0, i8* noundef %1, i8* noundef %2, i32* noundef nonnull align 4 dereferenceable(4) %3, i32* noundef nonnull align 4 dereferenceable(4) %4) #1 comdat align 2 {
  call void @_ZN7testing8internal11CmpHelperEQIiiEENS_15AssertionResultEPKcS4_RKT_RKT0_(%"class.testing::AssertionResult"* sret(%"class.testing::AssertionResult") align 8 %0, i8* noundef %1, i8* noundef %2, i32* noundef nonnull align 4 dereferenceable(4) %3, i32* noundef nonnull align 4 dereferenceable(4) %4)
  ret void
}

; Function Attrs: mustprogress noinline optnone uwtable
define linkonce_odr dso_local void @_ZN7testing8internal11CmpHelperEQIiiEENS_15AssertionResultEPKcS4_RKT_RKT0_(%"class.testing::AssertionResult"* noalias sret(%"class.testing::AssertionResult") align 8 %0, i8* noundef %1, i8* noundef %2, i32* noundef nonnull align 4 dereferenceable(4) %3, i32* noundef nonnull align 4 dereferenceable(4) %4) #1 comdat {
  %6 = load i32, i32* %3, align 4
  %7 = load i32, i32* %4, align 4
  %8 = icmp eq i32 %6, %7
  br i1 %8, label %9, label %10

9:                                                ; preds = %5
  call void @_ZN7testing16AssertionSuccessEv(%"class.testing::AssertionResult"* sret(%"class.testing::AssertionResult") align 8 %0)
  br label %11

10:                                               ; preds = %5
  call void @_ZN7testing8internal18CmpHelperEQFailureIiiEENS_15AssertionResultEPKcS4_RKT_RKT0_(%"class.testing::AssertionResult"* sret(%"class.testing::AssertionResult") align 8 %0, i8* noundef %1, i8* noundef %2, i32* noundef nonnull align 4 dereferenceable(4) %3, i32* noundef nonnull align 4 dereferenceable(4) %4)
  br label %11

11:                                               ; preds = %10, %9
  ret void
}

; Function Attrs: mustprogress noinline optnone uwtable
define linkonce_odr dso_local void @_ZN7testing8internal18CmpHelperEQFailureIiiEENS_15AssertionResultEPKcS4_RKT_RKT0_(%"class.testing::AssertionResult"* noalias sret(%"class.testing::AssertionResult") align 8 %0, i8* noundef %1, i8* noundef %2, i32* noundef nonnull align 4 dereferenceable(4) %3, i32* noundef nonnull align 4 dereferenceable(4) %4) #1 comdat {
  call void @_ZN7testing8internal18EqFailureEPKcS2_RKNSt7__cxx1112basic_stringIcSt11char_traitsIcESaIcEEES8_b(%"class.testing::AssertionResult"* sret(%"class.testing::AssertionResult") align 8 %0, i8* noundef %1, i8* noundef %2, i8* noundef null, i8* noundef null, i1 noundef zeroext false)
  ret void
}

declare void @_ZN7testing16AssertionSuccessEv(%"class.testing::AssertionResult"* sret(%"class.testing::AssertionResult") align 8)

declare void @_ZN7testing8internal18EqFailureEPKcS2_RKNSt7__cxx1112basic_stringIcSt11char_traitsIcESaIcEEES8_b(%"class.testing::AssertionResult"* sret(%"class.testing::AssertionResult") align 8, i8* noundef, i8* noundef, i8* noundef, i8* noundef, i1 noundef zeroext)
"#,
    )
}

/// Every scenario linked into one module
pub fn fixture_linked_suite() -> String {
    [
        fixture_add_int(),
        fixture_stack(),
        fixture_profile(),
        fixture_constant_fold(),
        fixture_multiply_with_helpers(),
    ]
    .join("\n")
}

pub const CHAIN_TEST: &str = "@_ZN10CHAIN_Test8TestBodyEv";

/// Mangled name of link `i` of [`fixture_call_chain`]
pub fn chain_link(i: usize) -> String {
    let name = format!("chain{i}");
    format!("@_Z{}{name}v", name.len())
}

/// Generate a chain `chain0` → `chain1` → ... → `chain{n-1}` called from one
/// test; every link returns its callee's result plus one
pub fn fixture_call_chain(n: usize) -> String {
    let mut definitions = String::new();
    for i in 0..n {
        if i + 1 < n {
            definitions.push_str(&format!(
                r#"define dso_local noundef i32 {link}() #0 {{
  %1 = call noundef i32 {next}()
  %2 = add nsw i32 %1, 1
  ret i32 %2
}}

"#,
                link = chain_link(i),
                next = chain_link(i + 1)
            ));
        } else {
            definitions.push_str(&format!(
                r#"define dso_local noundef i32 {link}() #0 {{
  ret i32 0
}}

"#,
                link = chain_link(i)
            ));
        }
    }
    definitions.push_str(
        r#"define dso_local void @_ZN10CHAIN_Test8TestBodyEv(%"class.testing::Test"* noundef nonnull align 8 dereferenceable(16) %0) unnamed_addr #1 align 2 {
  %2 = alloca %"class.testing::AssertionResult", align 8
  %3 = alloca i32, align 4
  %4 = alloca i32, align 4
  store i32 7, i32* %3, align 4
  %5 = call noundef i32 @_Z6chain0v()
  store i32 %5, i32* %4, align 4
  call void @_ZN7testing8internal11CmpHelperEQIiiEENS_15AssertionResultEPKcS4_RKT_RKT0_(%"class.testing::AssertionResult"* sret(%"class.testing::AssertionResult") align 8 %2, i8* noundef null, i8* noundef null, i32* noundef nonnull align 4 dereferenceable(4) %3, i32* noundef nonnull align 4 dereferenceable(4) %4)
  ret void
}
"#,
    );
    fixture_module("chain_test.cpp", &definitions)
}

const TEST_PARAMETER: &str = r#"%"class.testing::Test"* noundef nonnull align 8 dereferenceable(16) %0"#;

/// `CmpHelperEQ` call comparing the `i32` slots `lhs` and `rhs`
fn expect_eq(result: &str, lhs: &str, rhs: &str) -> String {
    format!(
        r#"call void @_ZN7testing8internal11CmpHelperEQIiiEENS_15AssertionResultEPKcS4_RKT_RKT0_(%"class.testing::AssertionResult"* sret(%"class.testing::AssertionResult") align 8 {result}, i8* noundef null, i8* noundef null, i32* noundef nonnull align 4 dereferenceable(4) {lhs}, i32* noundef nonnull align 4 dereferenceable(4) {rhs})"#
    )
}

pub const TOUCH: &str = "@_Z5touchPi";
pub const FORWARD: &str = "@_Z7forwardPi";
pub const CYCLE_TEST: &str = "@_ZN10CYCLE_Test8TestBodyEv";

/// `touch(&x); forward(&y); EXPECT_EQ(x, y);` where `touch` and `forward`
/// call each other and only `touch` writes, through an offset pointer.
/// `swapped` flips the assertion's operands.
pub fn fixture_shared_pointer_cycle(swapped: bool) -> String {
    let assertion = if swapped {
        expect_eq("%3", "%5", "%4")
    } else {
        expect_eq("%3", "%4", "%5")
    };
    fixture_module(
        "cycle_test.cpp",
        &format!(
            r#"define dso_local void @_Z5touchPi(i32* noundef %0) #0 {{
  call void @_Z7forwardPi(i32* noundef %0)
  %2 = getelementptr inbounds i32, i32* %0, i64 1
  store i32 1, i32* %2, align 4
  ret void
}}

define dso_local void @_Z7forwardPi(i32* noundef %0) #0 {{
  call void @_Z5touchPi(i32* noundef %0)
  ret void
}}

define dso_local void @_ZN10CYCLE_Test8TestBodyEv({TEST_PARAMETER}) unnamed_addr #1 align 2 {{
  %2 = alloca %"class.testing::Test"*, align 8
  %3 = alloca %"class.testing::AssertionResult", align 8
  %4 = alloca i32, align 4
  %5 = alloca i32, align 4
  store %"class.testing::Test"* %0, %"class.testing::Test"** %2, align 8
  call void @_Z5touchPi(i32* noundef %4)
  call void @_Z7forwardPi(i32* noundef %5)
  {assertion}
  ret void
}}
"#
        ),
    )
}

pub const OUTER: &str = "@_Z5outerPi";
pub const MIDDLE: &str = "@_Z6middlePi";
pub const INNER: &str = "@_Z5innerPi";
pub const DEPTH_TEST: &str = "@_ZN10DEPTH_Test8TestBodyEv";

/// `middle(&x); outer(&x); EXPECT_EQ(3, x);` with `outer` → `middle` → `inner`
/// and only `inner` storing
pub fn fixture_nested_writers() -> String {
    fixture_module(
        "depth_test.cpp",
        &format!(
            r#"define dso_local void @_Z5innerPi(i32* noundef %0) #0 {{
  store i32 0, i32* %0, align 4
  ret void
}}

define dso_local void @_Z6middlePi(i32* noundef %0) #0 {{
  call void @_Z5innerPi(i32* noundef %0)
  ret void
}}

define dso_local void @_Z5outerPi(i32* noundef %0) #0 {{
  call void @_Z6middlePi(i32* noundef %0)
  ret void
}}

define dso_local void @_ZN10DEPTH_Test8TestBodyEv({TEST_PARAMETER}) unnamed_addr #1 align 2 {{
  %2 = alloca %"class.testing::Test"*, align 8
  %3 = alloca %"class.testing::AssertionResult", align 8
  %4 = alloca i32, align 4
  %5 = alloca i32, align 4
  store %"class.testing::Test"* %0, %"class.testing::Test"** %2, align 8
  store i32 3, i32* %5, align 4
  call void @_Z6middlePi(i32* noundef %4)
  call void @_Z5outerPi(i32* noundef %4)
  {assertion}
  ret void
}}
"#,
            assertion = expect_eq("%3", "%5", "%4")
        ),
    )
}

pub const FILL: &str = "@_Z4fillPi";
pub const GLOBAL_TEST: &str = "@_ZN11GLOBAL_Test8TestBodyEv";

/// `fill(arr); EXPECT_EQ(7, arr[0]);` against a global array
pub fn fixture_global_array() -> String {
    let element = "getelementptr inbounds ([4 x i32], [4 x i32]* @arr, i64 0, i64 0)";
    fixture_module(
        "global_test.cpp",
        &format!(
            r#"@arr = dso_local global [4 x i32] zeroinitializer, align 16

define dso_local void @_Z4fillPi(i32* noundef %0) #0 {{
  %2 = alloca i32*, align 8
  store i32* %0, i32** %2, align 8
  %3 = load i32*, i32** %2, align 8
  store i32 7, i32* %3, align 4
  ret void
}}

define dso_local void @_ZN11GLOBAL_Test8TestBodyEv({TEST_PARAMETER}) unnamed_addr #1 align 2 {{
  %2 = alloca %"class.testing::Test"*, align 8
  %3 = alloca %"class.testing::AssertionResult", align 8
  %4 = alloca i32, align 4
  store %"class.testing::Test"* %0, %"class.testing::Test"** %2, align 8
  store i32 7, i32* %4, align 4
  call void @_Z4fillPi(i32* noundef {element})
  {assertion}
  ret void
}}
"#,
            assertion = expect_eq("%3", "%4", element)
        ),
    )
}

pub const SET_AGE: &str = "@_Z6setAgePii";
pub const GET_AGE: &str = "@_Z6getAgeP6Person";
pub const FIELD_TEST: &str = "@_ZN10FIELD_Test8TestBodyEv";

/// `setAge(&p.age, 30); EXPECT_EQ(30, getAge(&p));`
///
/// The setter only ever sees a pointer to the field, never `p` itself.
pub fn fixture_field_pointer() -> String {
    fixture_module(
        "field_test.cpp",
        &format!(
            r#"%struct.Person = type {{ i32, i32 }}

define dso_local void @_Z6setAgePii(i32* noundef %0, i32 noundef %1) #0 {{
  %3 = alloca i32*, align 8
  %4 = alloca i32, align 4
  store i32* %0, i32** %3, align 8
  store i32 %1, i32* %4, align 4
  %5 = load i32, i32* %4, align 4
  %6 = load i32*, i32** %3, align 8
  store i32 %5, i32* %6, align 4
  ret void
}}

define dso_local noundef i32 @_Z6getAgeP6Person(%struct.Person* noundef %0) #0 {{
  %2 = alloca %struct.Person*, align 8
  store %struct.Person* %0, %struct.Person** %2, align 8
  %3 = load %struct.Person*, %struct.Person** %2, align 8
  %4 = getelementptr inbounds %struct.Person, %struct.Person* %3, i32 0, i32 1
  %5 = load i32, i32* %4, align 4
  ret i32 %5
}}

define dso_local void @_ZN10FIELD_Test8TestBodyEv({TEST_PARAMETER}) unnamed_addr #1 align 2 {{
  %2 = alloca %"class.testing::Test"*, align 8
  %3 = alloca %struct.Person, align 4
  %4 = alloca %"class.testing::AssertionResult", align 8
  %5 = alloca i32, align 4
  %6 = alloca i32, align 4
  store %"class.testing::Test"* %0, %"class.testing::Test"** %2, align 8
  %7 = getelementptr inbounds %struct.Person, %struct.Person* %3, i32 0, i32 1
  call void @_Z6setAgePii(i32* noundef %7, i32 noundef 30)
  store i32 30, i32* %5, align 4
  %8 = call noundef i32 @_Z6getAgeP6Person(%struct.Person* noundef %3)
  store i32 %8, i32* %6, align 4
  {assertion}
  ret void
}}
"#,
            assertion = expect_eq("%4", "%5", "%6")
        ),
    )
}
